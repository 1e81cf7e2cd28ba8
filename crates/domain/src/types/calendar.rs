//! Account, profile and calendar listing models

use serde::{Deserialize, Serialize};

/// A calendar within a connected profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub provider_name: String,
    pub profile_id: String,
    pub profile_name: String,
    pub calendar_id: String,
    pub calendar_name: String,
    #[serde(default)]
    pub calendar_readonly: bool,
    #[serde(default)]
    pub calendar_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_primary: Option<bool>,
}

/// A connected provider profile (one per linked calendar account).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub provider_name: String,
    pub profile_id: String,
    pub profile_name: String,
    pub profile_connected: bool,
    /// Present when the profile lost its connection and needs relinking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_relink_url: Option<String>,
}

/// The authorized account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_tzid: Option<String>,
}

/// Identity information from the userinfo endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub sub: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_calendar_listing_entry() {
        let raw = serde_json::json!({
            "provider_name": "google",
            "profile_id": "pro_n23kjnwrw2",
            "profile_name": "example@meridianhq.com",
            "calendar_id": "cal_n23kjnwrw2_jsdfjksn234",
            "calendar_name": "Home",
            "calendar_readonly": false,
            "calendar_deleted": false
        });

        let calendar: Calendar = serde_json::from_value(raw).unwrap();
        assert_eq!(calendar.calendar_name, "Home");
        assert!(!calendar.calendar_readonly);
        assert_eq!(calendar.calendar_primary, None);
    }

    #[test]
    fn decodes_userinfo_type_field() {
        let raw = serde_json::json!({ "sub": "acc_5700a00eb0ccd07000000000", "type": "account" });
        let info: UserInfo = serde_json::from_value(raw).unwrap();
        assert_eq!(info.account_type.as_deref(), Some("account"));
    }
}
