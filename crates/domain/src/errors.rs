//! Error types used throughout the SDK

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the temporal value types and their wire codec.
///
/// Parsing never produces anything beyond these two kinds: a calendar triple
/// that does not denote a real date, or an input that matches none of the
/// recognised grammars. The `Format` message carries the offending input
/// verbatim so callers can assert on it.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeError {
    #[error("{year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("unrecognised time value: {0}")]
    Format(String),
}

impl TimeError {
    pub(crate) fn format(raw: impl Into<String>) -> Self {
        Self::Format(raw.into())
    }
}

/// Main error type for the Meridian SDK
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum MeridianError {
    #[error(transparent)]
    Time(#[from] TimeError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Meridian SDK operations
pub type Result<T> = std::result::Result<T, MeridianError>;
