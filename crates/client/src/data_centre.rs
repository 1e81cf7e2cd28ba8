//! Base-URL resolution keyed by data centre
//!
//! The Meridian API is deployed per data centre; each one has an `api` host
//! for REST calls and an `app` host for the browser-facing authorization
//! page. Tests point a [`UrlProvider`] at a stub server instead.

/// The data centres the API is deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataCentre {
    /// Default deployment.
    #[default]
    Us,
    De,
    Au,
    Uk,
}

impl DataCentre {
    #[must_use]
    pub fn api_base(self) -> &'static str {
        match self {
            Self::Us => "https://api.meridianhq.com",
            Self::De => "https://api-de.meridianhq.com",
            Self::Au => "https://api-au.meridianhq.com",
            Self::Uk => "https://api-uk.meridianhq.com",
        }
    }

    #[must_use]
    pub fn app_base(self) -> &'static str {
        match self {
            Self::Us => "https://app.meridianhq.com",
            Self::De => "https://app-de.meridianhq.com",
            Self::Au => "https://app-au.meridianhq.com",
            Self::Uk => "https://app-uk.meridianhq.com",
        }
    }
}

/// Resolved base URLs for one deployment.
#[derive(Debug, Clone)]
pub struct UrlProvider {
    api_base: String,
    app_base: String,
}

impl UrlProvider {
    #[must_use]
    pub fn for_data_centre(data_centre: DataCentre) -> Self {
        Self {
            api_base: data_centre.api_base().to_string(),
            app_base: data_centre.app_base().to_string(),
        }
    }

    /// Point both hosts at an arbitrary base (stub servers in tests).
    #[must_use]
    pub fn custom(api_base: impl Into<String>, app_base: impl Into<String>) -> Self {
        Self { api_base: api_base.into(), app_base: app_base.into() }
    }

    /// Absolute URL for an API path (`path` starts with `/`).
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{path}", self.api_base)
    }

    /// Absolute URL for an app path (`path` starts with `/`).
    #[must_use]
    pub fn app_url(&self, path: &str) -> String {
        format!("{}{path}", self.app_base)
    }
}

impl Default for UrlProvider {
    fn default() -> Self {
        Self::for_data_centre(DataCentre::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_centre_is_us() {
        let urls = UrlProvider::default();
        assert_eq!(urls.api_url("/v1/calendars"), "https://api.meridianhq.com/v1/calendars");
    }

    #[test]
    fn data_centres_resolve_distinct_hosts() {
        let de = UrlProvider::for_data_centre(DataCentre::De);
        assert_eq!(de.api_url("/v1/events"), "https://api-de.meridianhq.com/v1/events");
        assert_eq!(de.app_url("/oauth/authorize"), "https://app-de.meridianhq.com/oauth/authorize");
    }

    #[test]
    fn custom_bases_override_both_hosts() {
        let urls = UrlProvider::custom("http://127.0.0.1:4010", "http://127.0.0.1:4011");
        assert_eq!(urls.api_url("/v1/account"), "http://127.0.0.1:4010/v1/account");
        assert_eq!(urls.app_url("/oauth/authorize"), "http://127.0.0.1:4011/oauth/authorize");
    }
}
