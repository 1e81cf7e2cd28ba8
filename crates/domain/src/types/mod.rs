//! Domain types and wire models

pub mod auth;
pub mod availability;
pub mod calendar;
pub mod date;
pub mod event;
pub mod event_time;
pub mod free_busy;
pub mod instant;
pub mod notification;

// Re-export the commonly used types at the crate root
pub use auth::{LinkingProfile, TokenSet};
pub use availability::{AvailablePeriod, ParticipantRef};
pub use calendar::{Account, Calendar, Profile, UserInfo};
pub use date::Date;
pub use event::{Attendee, Event, EventStatus, EventsPage, Location, PageInfo};
pub use event_time::{EventTime, DEFAULT_TZID};
pub use free_busy::{FreeBusy, FreeBusyPage, FreeBusyStatus};
pub use instant::{format_instant, min_instant, parse_instant, MIN_INSTANT_EPOCH_SECS};
pub use notification::{Channel, ChannelFilters, Notification, PushNotification};
