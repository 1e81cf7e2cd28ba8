//! Builder for the availability query body

use meridian_domain::EventTime;
use serde::ser::Serializer;
use serde::Serialize;

/// Body of `POST /v1/availability`.
///
/// Asks the API for periods of at least `required_duration` minutes inside
/// the given available periods, during which the participant requirements
/// are met.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityRequest {
    participants: Vec<ParticipantGroup>,
    required_duration: DurationSpec,
    available_periods: Vec<TimePeriod>,
}

impl AvailabilityRequest {
    #[must_use]
    pub fn new(required_duration_minutes: u32) -> Self {
        Self {
            participants: Vec::new(),
            required_duration: DurationSpec { minutes: required_duration_minutes },
            available_periods: Vec::new(),
        }
    }

    /// Add a group of participants with its own requirement.
    #[must_use]
    pub fn participants(mut self, group: ParticipantGroup) -> Self {
        self.participants.push(group);
        self
    }

    /// Add a candidate period to search within.
    #[must_use]
    pub fn available_period(
        mut self,
        start: impl Into<EventTime>,
        end: impl Into<EventTime>,
    ) -> Self {
        self.available_periods.push(TimePeriod { start: start.into(), end: end.into() });
        self
    }
}

/// A group of candidate participants and how many of them are required.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantGroup {
    members: Vec<Member>,
    required: Required,
}

impl ParticipantGroup {
    /// A group where every member must be available.
    #[must_use]
    pub fn all() -> Self {
        Self { members: Vec::new(), required: Required::All }
    }

    /// A group where at least `count` members must be available.
    #[must_use]
    pub fn at_least(count: u32) -> Self {
        Self { members: Vec::new(), required: Required::AtLeast(count) }
    }

    /// Add a member by account/sub identifier. Repeatable.
    #[must_use]
    pub fn member(mut self, sub: impl Into<String>) -> Self {
        self.members.push(Member { sub: sub.into() });
        self
    }
}

/// Participant requirement: the wire form is either the string `"all"` or a
/// bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Required {
    All,
    AtLeast(u32),
}

impl Serialize for Required {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::All => serializer.serialize_str("all"),
            Self::AtLeast(count) => serializer.serialize_u32(*count),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct DurationSpec {
    minutes: u32,
}

#[derive(Debug, Clone, Serialize)]
struct Member {
    sub: String,
}

#[derive(Debug, Clone, Serialize)]
struct TimePeriod {
    start: EventTime,
    end: EventTime,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use serde_json::json;

    use super::*;

    #[test]
    fn builds_the_nested_wire_body() {
        let request = AvailabilityRequest::new(60)
            .participants(
                ParticipantGroup::all()
                    .member("acc_567236000909002")
                    .member("acc_678347111010113"),
            )
            .available_period(
                Utc.with_ymd_and_hms(2017, 1, 3, 9, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2017, 1, 3, 18, 0, 0).unwrap(),
            );

        let body = serde_json::to_value(request).unwrap();
        assert_eq!(
            body,
            json!({
                "participants": [
                    {
                        "members": [
                            { "sub": "acc_567236000909002" },
                            { "sub": "acc_678347111010113" }
                        ],
                        "required": "all"
                    }
                ],
                "required_duration": { "minutes": 60 },
                "available_periods": [
                    {
                        "start": "2017-01-03 09:00:00Z",
                        "end": "2017-01-03 18:00:00Z"
                    }
                ]
            })
        );
    }

    #[test]
    fn numeric_requirement_serializes_as_number() {
        let body =
            serde_json::to_value(ParticipantGroup::at_least(1).member("acc_567236000909002"))
                .unwrap();
        assert_eq!(body["required"], json!(1));
    }
}
