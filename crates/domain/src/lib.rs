//! # Meridian Domain
//!
//! Value types and wire models for the Meridian scheduling API.
//!
//! This crate contains:
//! - The temporal value types (`Date`, `EventTime`) and their wire codec
//! - Response models (events, calendars, free-busy, availability, channels)
//! - Domain error types and Result definitions
//!
//! ## Architecture
//! - No dependencies on other Meridian crates
//! - Pure value conversions: no I/O, no shared state, safe to call from any
//!   thread

pub mod errors;
pub mod types;

// Re-export commonly used items
pub use errors::{MeridianError, Result, TimeError};
pub use types::*;
