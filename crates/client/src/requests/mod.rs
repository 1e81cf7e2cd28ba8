//! Fluent request builders
//!
//! Each builder owns `self`, mirrors the nested JSON body (or query string)
//! of one endpoint, and only emits the fields that were actually set.

pub mod availability;
pub mod free_busy;
pub mod read_events;
pub mod upsert_event;

pub use availability::{AvailabilityRequest, ParticipantGroup, Required};
pub use free_busy::FreeBusyQuery;
pub use read_events::ReadEventsQuery;
pub use upsert_event::UpsertEventRequest;
