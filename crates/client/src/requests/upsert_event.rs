//! Builder for the upsert-event request body

use meridian_domain::{EventTime, Location};
use serde::Serialize;

/// Body of `POST /v1/calendars/{id}/events`.
///
/// The event is keyed by the caller-chosen `event_id`; posting the same id
/// again updates the event in place. Start and end accept anything
/// convertible to [`EventTime`]: a `Date` for all-day events, a
/// `DateTime<Utc>` for instants, or an explicit `EventTime` when a non-UTC
/// tzid matters.
#[derive(Debug, Clone, Serialize)]
pub struct UpsertEventRequest {
    event_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<EventTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<EventTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transparency: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reminders: Vec<Reminder>,
}

#[derive(Debug, Clone, Serialize)]
struct Reminder {
    minutes: u32,
}

impl UpsertEventRequest {
    #[must_use]
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            summary: None,
            description: None,
            start: None,
            end: None,
            location: None,
            transparency: None,
            reminders: Vec::new(),
        }
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn start(mut self, start: impl Into<EventTime>) -> Self {
        self.start = Some(start.into());
        self
    }

    #[must_use]
    pub fn end(mut self, end: impl Into<EventTime>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Free-text location description.
    #[must_use]
    pub fn location(mut self, description: impl Into<String>) -> Self {
        self.location =
            Some(Location { description: Some(description.into()), lat: None, long: None });
        self
    }

    #[must_use]
    pub fn transparency(mut self, transparency: impl Into<String>) -> Self {
        self.transparency = Some(transparency.into());
        self
    }

    /// Add a reminder the given number of minutes before the event.
    #[must_use]
    pub fn reminder(mut self, minutes: u32) -> Self {
        self.reminders.push(Reminder { minutes });
        self
    }
}
