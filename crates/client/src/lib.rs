//! # Meridian Client
//!
//! HTTP-facing half of the Meridian SDK.
//!
//! This crate contains:
//! - The injectable [`http::HttpTransport`] seam and its `reqwest` impl
//! - Endpoint wrappers ([`client::Client`]) and request builders
//! - OAuth helpers ([`oauth::OAuthClient`]) and webhook payload parsing
//!
//! ## Architecture
//! - Depends on `meridian-domain` for all value types and errors
//! - Every network call goes through the transport seam; nothing here keeps
//!   state between calls

pub mod client;
pub mod data_centre;
pub mod http;
pub mod oauth;
pub mod requests;
pub mod webhooks;

// Re-export commonly used items
pub use client::Client;
pub use data_centre::{DataCentre, UrlProvider};
pub use http::{ApiRequest, ApiResponse, HttpTransport, ReqwestTransport};
pub use oauth::OAuthClient;
pub use requests::{
    AvailabilityRequest, FreeBusyQuery, ParticipantGroup, ReadEventsQuery, UpsertEventRequest,
};
pub use webhooks::parse_notification;
