//! OAuth token models

use serde::{Deserialize, Serialize};

/// Tokens returned by the OAuth token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the access token expires.
    pub expires_in: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Space-separated granted scopes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Present when the grant was linked to an existing provider profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linking_profile: Option<LinkingProfile>,
}

impl TokenSet {
    /// Granted scopes as individual entries.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        self.scope.as_deref().map(|s| s.split_whitespace().collect()).unwrap_or_default()
    }
}

/// Profile linkage details attached to a token grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkingProfile {
    pub provider_name: String,
    pub profile_id: String,
    pub profile_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_token_response() {
        let raw = serde_json::json!({
            "access_token": "P531x88i05Ld2yXHIQ7WjiEyqlmOHsgI",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "3gBYG1XamYDUEXUyybbummQWEe5YqPmf",
            "scope": "read_events create_event delete_event",
            "account_id": "acc_5700a00eb0ccd07000000000",
            "linking_profile": {
                "provider_name": "google",
                "profile_id": "pro_n23kjnwrw2",
                "profile_name": "example@meridianhq.com"
            }
        });

        let tokens: TokenSet = serde_json::from_value(raw).unwrap();
        assert_eq!(tokens.scopes(), vec!["read_events", "create_event", "delete_event"]);
        assert_eq!(tokens.linking_profile.as_ref().map(|p| p.provider_name.as_str()), Some("google"));
    }

    #[test]
    fn scopes_default_to_empty() {
        let raw = serde_json::json!({
            "access_token": "P531x88i05Ld2yXHIQ7WjiEyqlmOHsgI",
            "token_type": "bearer",
            "expires_in": 3600
        });

        let tokens: TokenSet = serde_json::from_value(raw).unwrap();
        assert!(tokens.scopes().is_empty());
        assert!(tokens.refresh_token.is_none());
    }
}
