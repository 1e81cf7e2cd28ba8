//! Availability query response models

use serde::{Deserialize, Serialize};

use super::event_time::EventTime;

/// A period during which all required participants are available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailablePeriod {
    pub start: EventTime,
    pub end: EventTime,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<ParticipantRef>,
}

/// Reference to a participating account within an available period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRef {
    pub sub: String,
}
