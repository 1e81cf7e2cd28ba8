//! Free-busy period models

use serde::{Deserialize, Serialize};

use super::event::PageInfo;
use super::event_time::EventTime;

/// One busy (or free) period of a calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeBusy {
    pub calendar_id: String,
    pub start: EventTime,
    pub end: EventTime,
    pub free_busy_status: FreeBusyStatus,
}

/// Busy state of a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeBusyStatus {
    Free,
    Busy,
    Tentative,
    #[serde(other)]
    Unknown,
}

/// One page of the free-busy listing.
#[derive(Debug, Clone, Deserialize)]
pub struct FreeBusyPage {
    pub pages: PageInfo,
    pub free_busy: Vec<FreeBusy>,
}
