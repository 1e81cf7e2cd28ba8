//! Event time values and their wire codec
//!
//! The Meridian API transmits event times in three shapes:
//! - a bare date string: `"2014-09-13"`
//! - a bare date-time string: `"2015-09-19T12:30:45Z"` (ISO 8601) or the
//!   legacy compact form `"2015-09-19 12:30:45Z"`
//! - a structured object: `{"time": "...", "tzid": "Europe/London"}`
//!
//! An [`EventTime`] is either a floating date or an absolute instant, always
//! paired with an IANA timezone identifier. The codec here is the single
//! parse/format seam used by every request builder and response model; it is
//! an explicit grammar-by-grammar parser, not exception-driven dispatch.
//!
//! The trailing `Z` of the legacy compact form is a fixed literal, not an
//! offset marker: a zoned instant is rendered as the wall clock of its tzid
//! with `Z` appended regardless of the actual UTC offset. On the way back in,
//! that wall clock is re-anchored in the object's tzid, which is what keeps
//! structured round-trips lossless for non-UTC zones.

use chrono::offset::LocalResult;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::de::Error as DeError;
use serde::ser::Error as SerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

use super::date::Date;
use crate::errors::TimeError;

/// The timezone identifier assumed when the wire form carries none.
pub const DEFAULT_TZID: &str = "Etc/UTC";

const LEGACY_COMPACT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Either a floating calendar date or an absolute instant, tagged with the
/// IANA timezone identifier under which the remote system echoes it back.
///
/// The tzid is part of identity: two numerically equal instants tagged with
/// different zone identifiers compare unequal, because they are displayed and
/// echoed differently by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTime {
    /// A floating date with no associated clock time.
    DateOnly { date: Date, tzid: String },
    /// An absolute point in time plus its display timezone.
    ZonedInstant { instant: DateTime<Utc>, tzid: String },
}

impl EventTime {
    /// A floating date in the default `Etc/UTC` context.
    #[must_use]
    pub fn date(date: Date) -> Self {
        Self::DateOnly { date, tzid: DEFAULT_TZID.to_string() }
    }

    /// A floating date in an explicit timezone context.
    ///
    /// # Errors
    /// Returns [`TimeError::Format`] when `tzid` is empty or not a known IANA
    /// identifier.
    pub fn date_in(date: Date, tzid: impl Into<String>) -> Result<Self, TimeError> {
        let tzid = validated_tzid(tzid.into())?;
        Ok(Self::DateOnly { date, tzid })
    }

    /// An absolute instant, defaulting the timezone identifier to `Etc/UTC`.
    #[must_use]
    pub fn instant(instant: DateTime<Utc>) -> Self {
        Self::ZonedInstant { instant, tzid: DEFAULT_TZID.to_string() }
    }

    /// An absolute instant displayed under an explicit timezone.
    ///
    /// # Errors
    /// Returns [`TimeError::Format`] when `tzid` is empty or not a known IANA
    /// identifier.
    pub fn instant_in(instant: DateTime<Utc>, tzid: impl Into<String>) -> Result<Self, TimeError> {
        let tzid = validated_tzid(tzid.into())?;
        Ok(Self::ZonedInstant { instant, tzid })
    }

    /// The timezone identifier attached to this value. Always non-empty.
    #[must_use]
    pub fn tzid(&self) -> &str {
        match self {
            Self::DateOnly { tzid, .. } | Self::ZonedInstant { tzid, .. } => tzid,
        }
    }

    /// Whether the attached tzid is the default `Etc/UTC`.
    #[must_use]
    pub fn has_default_tzid(&self) -> bool {
        self.tzid() == DEFAULT_TZID
    }

    /// Render the compact string form.
    ///
    /// Floating dates render as `YYYY-MM-DD`. Instants render as the wall
    /// clock of their tzid in `yyyy-MM-dd HH:mm:ssZ` with the literal `Z`
    /// suffix. Compact output cannot carry a zone identifier, so call sites
    /// only use it for default-tzid values; the rendering itself works for
    /// any known zone.
    ///
    /// # Errors
    /// Returns [`TimeError::Format`] if the tzid is not a known IANA zone
    /// (only possible for hand-built variants that bypassed the
    /// constructors).
    pub fn compact_string(&self) -> Result<String, TimeError> {
        match self {
            Self::DateOnly { date, .. } => Ok(date.to_string()),
            Self::ZonedInstant { instant, tzid } => {
                let tz: Tz = tzid.parse().map_err(|_| TimeError::format(tzid.clone()))?;
                let wall = instant.with_timezone(&tz);
                Ok(format!("{}Z", wall.format(LEGACY_COMPACT_FORMAT)))
            }
        }
    }

    /// Format for the wire, choosing the shape by the default-tzid rule:
    /// compact (bare string) only when the tzid is `Etc/UTC`, structured
    /// otherwise.
    ///
    /// # Errors
    /// Returns [`TimeError::Format`] on an unknown tzid.
    pub fn to_wire(&self) -> Result<Value, TimeError> {
        if self.has_default_tzid() {
            Ok(Value::String(self.compact_string()?))
        } else {
            self.to_structured()
        }
    }

    /// Format as the structured `{"time", "tzid"}` object regardless of
    /// tzid.
    ///
    /// # Errors
    /// Returns [`TimeError::Format`] on an unknown tzid.
    pub fn to_structured(&self) -> Result<Value, TimeError> {
        Ok(json!({ "time": self.compact_string()?, "tzid": self.tzid() }))
    }

    /// Parse any of the recognised wire shapes.
    ///
    /// Grammars are tried in order: bare date, bare date-time, structured
    /// object. Anything else (a number, a malformed string, an object
    /// without `time`) fails naming the raw input.
    ///
    /// # Errors
    /// Returns [`TimeError::Format`] when no grammar matches, or
    /// [`TimeError::InvalidDate`] when a date-shaped component is not a real
    /// date.
    pub fn from_wire(raw: &Value) -> Result<Self, TimeError> {
        match raw {
            Value::String(text) => Self::parse_bare(text),
            Value::Object(fields) => {
                let time = fields
                    .get("time")
                    .and_then(Value::as_str)
                    .ok_or_else(|| TimeError::format(raw.to_string()))?;
                let tzid = match fields.get("tzid") {
                    None => DEFAULT_TZID,
                    Some(value) => {
                        value.as_str().ok_or_else(|| TimeError::format(raw.to_string()))?
                    }
                };
                Self::parse_tagged(time, tzid)
            }
            other => Err(TimeError::format(other.to_string())),
        }
    }

    /// Parse a bare string (no structured wrapper). The zone identifier is
    /// not recoverable from a bare string, so it defaults to `Etc/UTC`.
    ///
    /// # Errors
    /// Returns [`TimeError::Format`] when the string matches none of the
    /// bare grammars.
    pub fn parse_bare(text: &str) -> Result<Self, TimeError> {
        Self::parse_tagged(text, DEFAULT_TZID)
    }

    /// Parse a time string in the context of an explicit tzid.
    ///
    /// - a bare date becomes a floating date tagged with `tzid`;
    /// - an ISO date-time carries a genuine offset (or `Z`) which fixes the
    ///   instant exactly; the tzid is attached as-is;
    /// - a legacy compact date-time is a wall clock (its `Z` is a literal),
    ///   so it is anchored in `tzid` to recover the instant.
    fn parse_tagged(text: &str, tzid: &str) -> Result<Self, TimeError> {
        if let Some(date) = Date::try_parse(text) {
            return Self::date_in(date, tzid);
        }

        if let Ok(fixed) = DateTime::parse_from_rfc3339(text) {
            return Self::instant_in(fixed.with_timezone(&Utc), tzid);
        }

        if let Some(wall) = parse_legacy_compact(text) {
            let instant = anchor_wall_clock(wall, tzid, text)?;
            return Self::instant_in(instant, tzid);
        }

        Err(TimeError::format(text))
    }
}

impl From<Date> for EventTime {
    fn from(date: Date) -> Self {
        Self::date(date)
    }
}

impl From<DateTime<Utc>> for EventTime {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::instant(instant)
    }
}

impl Serialize for EventTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().map_err(S::Error::custom)?.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EventTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_wire(&raw).map_err(D::Error::custom)
    }
}

fn validated_tzid(tzid: String) -> Result<String, TimeError> {
    if tzid.is_empty() || tzid.parse::<Tz>().is_err() {
        return Err(TimeError::format(tzid));
    }
    Ok(tzid)
}

fn parse_legacy_compact(text: &str) -> Option<NaiveDateTime> {
    let head = text.strip_suffix('Z')?;
    NaiveDateTime::parse_from_str(head, LEGACY_COMPACT_FORMAT).ok()
}

/// Anchor a wall-clock reading in the given zone. Ambiguous local times (the
/// repeated hour when clocks fall back) resolve to the earlier offset; local
/// times inside a spring-forward gap do not exist and are rejected.
fn anchor_wall_clock(wall: NaiveDateTime, tzid: &str, raw: &str) -> Result<DateTime<Utc>, TimeError> {
    let tz: Tz = tzid.parse().map_err(|_| TimeError::format(raw))?;
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(anchored) => Ok(anchored.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(TimeError::format(raw)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::new(y, m, d).unwrap()
    }

    #[test]
    fn instant_constructor_defaults_tzid_to_utc() {
        let value = EventTime::instant(utc(2015, 9, 19, 12, 30, 45));
        assert_eq!(value.tzid(), DEFAULT_TZID);
        assert!(value.has_default_tzid());
    }

    #[test]
    fn constructors_reject_unknown_tzids() {
        assert!(EventTime::date_in(date(2015, 9, 19), "Mars/Olympus").is_err());
        assert!(EventTime::instant_in(utc(2015, 9, 19, 12, 0, 0), "").is_err());
    }

    #[test]
    fn tzid_is_part_of_identity() {
        let instant = utc(2015, 9, 19, 12, 30, 45);
        let in_utc = EventTime::instant(instant);
        let in_london = EventTime::instant_in(instant, "Europe/London").unwrap();
        assert_ne!(in_utc, in_london);
        assert_eq!(in_london, EventTime::instant_in(instant, "Europe/London").unwrap());
    }

    #[test]
    fn date_only_structured_form_carries_default_tzid() {
        let value = EventTime::date(date(2015, 9, 19));
        assert_eq!(
            value.to_structured().unwrap(),
            json!({ "time": "2015-09-19", "tzid": "Etc/UTC" })
        );
    }

    #[test]
    fn date_only_default_tzid_compacts_to_bare_date() {
        let value = EventTime::date(date(2015, 9, 19));
        assert_eq!(value.to_wire().unwrap(), json!("2015-09-19"));
    }

    #[test]
    fn date_only_foreign_tzid_mandates_structured_form() {
        let value = EventTime::date_in(date(2015, 9, 19), "America/New_York").unwrap();
        assert_eq!(
            value.to_wire().unwrap(),
            json!({ "time": "2015-09-19", "tzid": "America/New_York" })
        );
    }

    #[test]
    fn compact_form_renders_wall_clock_of_tzid() {
        // 12:30:45 UTC is 13:30:45 in London during British Summer Time; the
        // trailing Z is a literal, not an offset claim.
        let value =
            EventTime::instant_in(utc(2015, 9, 19, 12, 30, 45), "Europe/London").unwrap();
        assert_eq!(value.compact_string().unwrap(), "2015-09-19 13:30:45Z");
    }

    #[test]
    fn utc_instant_compacts_to_bare_string() {
        let value = EventTime::instant(utc(2015, 9, 19, 12, 30, 45));
        assert_eq!(value.to_wire().unwrap(), json!("2015-09-19 12:30:45Z"));
    }

    #[test]
    fn zoned_instant_wire_form_is_structured() {
        let value =
            EventTime::instant_in(utc(2015, 9, 19, 12, 30, 45), "Europe/London").unwrap();
        assert_eq!(
            value.to_wire().unwrap(),
            json!({ "time": "2015-09-19 13:30:45Z", "tzid": "Europe/London" })
        );
    }

    #[test]
    fn parses_bare_date_string() {
        let value = EventTime::from_wire(&json!("2014-09-13")).unwrap();
        assert_eq!(value, EventTime::date(date(2014, 9, 13)));
    }

    #[test]
    fn parses_bare_iso_instant() {
        let value = EventTime::from_wire(&json!("2015-09-19T12:30:45Z")).unwrap();
        assert_eq!(value, EventTime::instant(utc(2015, 9, 19, 12, 30, 45)));
    }

    #[test]
    fn parses_bare_iso_instant_with_numeric_offset() {
        let value = EventTime::from_wire(&json!("2014-09-13T20:00:00+01:00")).unwrap();
        assert_eq!(value, EventTime::instant(utc(2014, 9, 13, 19, 0, 0)));
    }

    #[test]
    fn structured_iso_offset_fixes_instant_and_tags_tzid() {
        let raw = json!({ "time": "2014-09-13T20:00:00+01:00", "tzid": "Europe/London" });
        let value = EventTime::from_wire(&raw).unwrap();
        assert_eq!(
            value,
            EventTime::instant_in(utc(2014, 9, 13, 19, 0, 0), "Europe/London").unwrap()
        );
    }

    #[test]
    fn structured_legacy_compact_is_anchored_in_tzid() {
        let raw = json!({ "time": "2015-09-19 13:30:45Z", "tzid": "Europe/London" });
        let value = EventTime::from_wire(&raw).unwrap();
        assert_eq!(
            value,
            EventTime::instant_in(utc(2015, 9, 19, 12, 30, 45), "Europe/London").unwrap()
        );
    }

    #[test]
    fn structured_date_is_retagged_with_tzid() {
        let raw = json!({ "time": "2015-09-19", "tzid": "America/New_York" });
        let value = EventTime::from_wire(&raw).unwrap();
        assert_eq!(value, EventTime::date_in(date(2015, 9, 19), "America/New_York").unwrap());
    }

    #[test]
    fn structured_without_tzid_defaults_to_utc() {
        let value = EventTime::from_wire(&json!({ "time": "2015-09-19 12:30:45Z" })).unwrap();
        assert_eq!(value, EventTime::instant(utc(2015, 9, 19, 12, 30, 45)));
    }

    #[test]
    fn rejects_unrecognised_shapes() {
        for raw in [json!(1_410_000_000), json!("19/09/2015"), json!({ "tzid": "Etc/UTC" })] {
            let err = EventTime::from_wire(&raw).unwrap_err();
            assert!(matches!(err, TimeError::Format(_)), "accepted {raw}");
        }
    }

    #[test]
    fn format_error_names_the_raw_input() {
        let err = EventTime::from_wire(&json!("19/09/2015")).unwrap_err();
        assert!(err.to_string().contains("19/09/2015"));

        let err = EventTime::from_wire(&json!({ "tzid": "Etc/UTC" })).unwrap_err();
        assert!(err.to_string().contains("tzid"));
    }

    #[test]
    fn structured_round_trip_is_lossless() {
        let values = [
            EventTime::date(date(2015, 9, 19)),
            EventTime::date_in(date(2015, 9, 19), "America/New_York").unwrap(),
            EventTime::instant(utc(2015, 9, 19, 12, 30, 45)),
            EventTime::instant_in(utc(2015, 9, 19, 12, 30, 45), "Europe/London").unwrap(),
            EventTime::instant_in(utc(2021, 1, 2, 3, 4, 5), "Asia/Tokyo").unwrap(),
        ];

        for value in values {
            let wire = value.to_structured().unwrap();
            assert_eq!(EventTime::from_wire(&wire).unwrap(), value, "wire was {wire}");
        }
    }

    #[test]
    fn wire_round_trip_is_lossless() {
        let values = [
            EventTime::date(date(2014, 9, 13)),
            EventTime::instant(utc(2015, 9, 19, 12, 30, 45)),
            EventTime::instant_in(utc(2015, 9, 19, 12, 30, 45), "Australia/Sydney").unwrap(),
        ];

        for value in values {
            let wire = value.to_wire().unwrap();
            assert_eq!(EventTime::from_wire(&wire).unwrap(), value, "wire was {wire}");
        }
    }

    #[test]
    fn ambiguous_wall_clock_resolves_to_earlier_offset() {
        // London repeats 01:30 on 2015-10-25 when BST ends; the earlier pass
        // is 00:30 UTC.
        let raw = json!({ "time": "2015-10-25 01:30:00Z", "tzid": "Europe/London" });
        let value = EventTime::from_wire(&raw).unwrap();
        assert_eq!(
            value,
            EventTime::instant_in(utc(2015, 10, 25, 0, 30, 0), "Europe/London").unwrap()
        );
    }

    #[test]
    fn nonexistent_wall_clock_is_rejected() {
        // 01:30 never happens in London on 2015-03-29 (spring forward).
        let raw = json!({ "time": "2015-03-29 01:30:00Z", "tzid": "Europe/London" });
        assert!(EventTime::from_wire(&raw).is_err());
    }

    #[test]
    fn serde_integrates_with_parent_models() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Period {
            start: EventTime,
            end: EventTime,
        }

        let period = Period {
            start: EventTime::date(date(2015, 9, 19)),
            end: EventTime::instant_in(utc(2015, 9, 19, 12, 30, 45), "Europe/London").unwrap(),
        };

        let encoded = serde_json::to_string(&period).unwrap();
        assert_eq!(serde_json::from_str::<Period>(&encoded).unwrap(), period);
    }
}
