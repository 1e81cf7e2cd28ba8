//! Webhook payload parsing
//!
//! Channels deliver change notifications by POSTing JSON to the registered
//! callback URL. The integrating application hands the raw body here to get
//! a typed [`PushNotification`].

use meridian_domain::{MeridianError, PushNotification, Result};

/// Parse the body of a channel callback request.
///
/// # Errors
/// Returns [`MeridianError::InvalidInput`] when the body is not a
/// well-formed notification payload.
pub fn parse_notification(body: &str) -> Result<PushNotification> {
    serde_json::from_str(body).map_err(|err| {
        MeridianError::InvalidInput(format!("failed to parse notification payload: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    #[test]
    fn parses_change_notification_body() {
        let body = r#"{
            "notification": {
                "type": "change",
                "changes_since": "2014-09-13T20:24:00Z"
            },
            "channel": {
                "channel_id": "chn_54cf7c7cb4ad4c1027000001",
                "callback_url": "https://example.com/callback"
            }
        }"#;

        let payload = parse_notification(body).unwrap();
        assert_eq!(payload.notification.kind, "change");
        assert_eq!(
            payload.notification.changes_since,
            Some(Utc.with_ymd_and_hms(2014, 9, 13, 20, 24, 0).unwrap())
        );
    }

    #[test]
    fn malformed_bodies_are_invalid_input() {
        let err = parse_notification("not json").unwrap_err();
        assert!(matches!(err, MeridianError::InvalidInput(_)));

        let err = parse_notification("{\"unexpected\":true}").unwrap_err();
        assert!(matches!(err, MeridianError::InvalidInput(_)));
    }
}
