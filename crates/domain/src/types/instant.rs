//! Plain-instant wire codec
//!
//! Some wire fields carry only an absolute instant with no floating-date
//! option and no zone tagging (channel creation times, `changes_since`
//! cursors, last-modified filters). This codec accepts full ISO 8601
//! date-time strings only; a bare date is not a valid value here.
//!
//! Upstream systems occasionally emit sentinel "beginning of time" values
//! that predate year 1. Those are clamped to [`MIN_INSTANT_EPOCH_SECS`]
//! rather than rejected, a deliberate compatibility shim rather than a
//! general parsing rule.

use chrono::{DateTime, Utc};

use crate::errors::TimeError;

/// Unix timestamp of `0001-01-01T00:00:00Z`, the minimum instant the remote
/// API represents.
pub const MIN_INSTANT_EPOCH_SECS: i64 = -62_135_596_800;

/// The minimum representable instant, `0001-01-01T00:00:00Z`.
#[must_use]
pub fn min_instant() -> DateTime<Utc> {
    DateTime::from_timestamp(MIN_INSTANT_EPOCH_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Parse a full ISO 8601 date-time string into a UTC instant, clamping
/// anything before the minimum representable instant.
///
/// # Errors
/// Returns [`TimeError::Format`] echoing the input for bare dates and
/// unparseable text.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, TimeError> {
    let parsed =
        DateTime::parse_from_rfc3339(raw).map_err(|_| TimeError::format(raw))?.with_timezone(&Utc);

    if parsed < min_instant() {
        Ok(min_instant())
    } else {
        Ok(parsed)
    }
}

/// Render an instant in the ISO form the API expects.
#[must_use]
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Serde adapter for `DateTime<Utc>` fields using this codec, for use with
/// `#[serde(with = "clamped_instant")]`.
pub mod clamped_instant {
    use chrono::{DateTime, Utc};
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{format_instant, parse_instant};

    pub fn serialize<S: Serializer>(
        instant: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_instant(instant))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_instant(&raw).map_err(D::Error::custom)
    }
}

/// Serde adapter for optional instant fields, for use with
/// `#[serde(default, with = "clamped_instant_opt")]`.
pub mod clamped_instant_opt {
    use chrono::{DateTime, Utc};
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{format_instant, parse_instant};

    pub fn serialize<S: Serializer>(
        instant: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match instant {
            Some(value) => serializer.serialize_some(&format_instant(value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_instant(&raw).map(Some).map_err(D::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_iso_instants() {
        let instant = parse_instant("2015-09-19T12:30:45Z").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2015, 9, 19, 12, 30, 45).unwrap());
    }

    #[test]
    fn parses_numeric_offsets_into_utc() {
        let instant = parse_instant("2014-09-13T20:00:00+01:00").unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2014, 9, 13, 19, 0, 0).unwrap());
    }

    #[test]
    fn rejects_bare_dates() {
        let err = parse_instant("2015-09-19").unwrap_err();
        assert!(err.to_string().contains("2015-09-19"));
    }

    #[test]
    fn rejects_junk() {
        assert!(parse_instant("nonsense").is_err());
    }

    #[test]
    fn clamps_instants_before_year_one() {
        let instant = parse_instant("0000-12-29T00:00:00Z").unwrap();
        assert_eq!(instant, min_instant());
        assert_eq!(instant.timestamp(), MIN_INSTANT_EPOCH_SECS);
    }

    #[test]
    fn minimum_instant_itself_is_not_clamped() {
        let instant = parse_instant("0001-01-01T00:00:00Z").unwrap();
        assert_eq!(instant, min_instant());
    }

    #[test]
    fn formats_in_iso_form() {
        let instant = Utc.with_ymd_and_hms(2015, 9, 19, 12, 30, 45).unwrap();
        assert_eq!(format_instant(&instant), "2015-09-19T12:30:45Z");
    }

    #[test]
    fn serde_adapter_round_trips() {
        use serde::{Deserialize, Serialize};

        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Channel {
            #[serde(with = "super::clamped_instant")]
            created: chrono::DateTime<Utc>,
        }

        let channel = Channel { created: Utc.with_ymd_and_hms(2015, 9, 19, 12, 30, 45).unwrap() };
        let encoded = serde_json::to_string(&channel).unwrap();
        assert_eq!(encoded, r#"{"created":"2015-09-19T12:30:45Z"}"#);
        assert_eq!(serde_json::from_str::<Channel>(&encoded).unwrap(), channel);
    }
}
