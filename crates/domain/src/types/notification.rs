//! Push channel and webhook notification models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::instant::clamped_instant_opt;

/// A push-notification channel registered against the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub channel_id: String,
    pub callback_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<ChannelFilters>,
}

/// Optional filters limiting which changes a channel reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_managed: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calendar_ids: Vec<String>,
}

/// The body POSTed to a channel's callback URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotification {
    pub notification: Notification,
    pub channel: Channel,
}

/// The change description inside a push notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// `"verification"` on channel creation, `"change"` afterwards.
    #[serde(rename = "type")]
    pub kind: String,
    /// Cursor to pass as `last_modified` when re-reading events. Absent on
    /// verification pings.
    #[serde(default, with = "clamped_instant_opt", skip_serializing_if = "Option::is_none")]
    pub changes_since: Option<DateTime<Utc>>,
}
