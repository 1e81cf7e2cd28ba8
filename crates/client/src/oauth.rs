//! OAuth 2.0 helpers
//!
//! The SDK side of the authorization-code flow: building the URL the user's
//! browser is sent to, exchanging the returned code for tokens, refreshing
//! them, and revoking a grant. There is no loopback callback server here —
//! the redirect target belongs to the integrating application.

use std::sync::Arc;

use meridian_domain::{MeridianError, Result, TokenSet};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::data_centre::{DataCentre, UrlProvider};
use crate::http::{ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport};

/// Client-credentialed OAuth operations.
#[derive(Clone)]
pub struct OAuthClient {
    client_id: String,
    client_secret: String,
    urls: UrlProvider,
    transport: Arc<dyn HttpTransport>,
}

impl OAuthClient {
    /// OAuth client for the default data centre.
    ///
    /// # Errors
    /// Returns [`MeridianError::Config`] if the transport cannot be built.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        Self::for_data_centre(client_id, client_secret, DataCentre::default())
    }

    /// OAuth client pinned to a specific data centre.
    ///
    /// # Errors
    /// Returns [`MeridianError::Config`] if the transport cannot be built.
    pub fn for_data_centre(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        data_centre: DataCentre,
    ) -> Result<Self> {
        Ok(Self::with_transport(
            client_id,
            client_secret,
            UrlProvider::for_data_centre(data_centre),
            Arc::new(ReqwestTransport::new()?),
        ))
    }

    /// OAuth client with explicit base URLs and transport.
    pub fn with_transport(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        urls: UrlProvider,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            urls,
            transport,
        }
    }

    /// Start building the browser authorization URL for `redirect_uri`.
    #[must_use]
    pub fn authorization_url(&self, redirect_uri: impl Into<String>) -> AuthorizationUrlBuilder {
        AuthorizationUrlBuilder {
            app_authorize_url: self.urls.app_url("/oauth/authorize"),
            client_id: self.client_id.clone(),
            redirect_uri: redirect_uri.into(),
            scopes: Vec::new(),
            state: None,
            avoid_linking: false,
        }
    }

    /// Exchange an authorization code for a token set.
    ///
    /// `redirect_uri` must match the one the code was issued against.
    ///
    /// # Errors
    /// Returns [`MeridianError::Auth`] when the token endpoint rejects the
    /// exchange.
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<TokenSet> {
        debug!(client_id = %self.client_id, "exchanging authorization code");
        let body = serde_json::json!({
            "client_id": self.client_id,
            "client_secret": self.client_secret,
            "grant_type": "authorization_code",
            "code": code,
            "redirect_uri": redirect_uri,
        });
        self.token_request(&body).await
    }

    /// Obtain a fresh token set from a refresh token.
    ///
    /// # Errors
    /// Returns [`MeridianError::Auth`] when the refresh is rejected.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenSet> {
        debug!(client_id = %self.client_id, "refreshing access token");
        let body = serde_json::json!({
            "client_id": self.client_id,
            "client_secret": self.client_secret,
            "grant_type": "refresh_token",
            "refresh_token": refresh_token,
        });
        self.token_request(&body).await
    }

    /// Revoke a grant. Accepts either token of the pair; the whole grant is
    /// revoked.
    ///
    /// # Errors
    /// Returns [`MeridianError::Auth`] when revocation is rejected.
    pub async fn revoke_token(&self, token: &str) -> Result<()> {
        let body = serde_json::json!({
            "client_id": self.client_id,
            "client_secret": self.client_secret,
            "token": token,
        });

        let request = ApiRequest::new(Method::POST, self.urls.api_url("/oauth/token/revoke"))
            .json(&body)?;
        let response = self.transport.execute(request).await?;
        map_oauth_failure(response)?;
        Ok(())
    }

    async fn token_request(&self, body: &serde_json::Value) -> Result<TokenSet> {
        let request =
            ApiRequest::new(Method::POST, self.urls.api_url("/oauth/token")).json(body)?;
        let response = self.transport.execute(request).await?;
        map_oauth_failure(response)?.json()
    }
}

/// Surface OAuth error payloads (`{"error": "..."}`) as authentication
/// errors; fall back to the raw body when the payload is not that shape.
fn map_oauth_failure(response: ApiResponse) -> Result<ApiResponse> {
    #[derive(Deserialize)]
    struct OAuthErrorBody {
        error: String,
    }

    if response.is_success() {
        return Ok(response);
    }

    let message = serde_json::from_str::<OAuthErrorBody>(&response.body)
        .map_or(response.body, |payload| payload.error);
    Err(MeridianError::Auth(message))
}

/// Fluent builder for the browser authorization URL.
#[derive(Debug, Clone)]
pub struct AuthorizationUrlBuilder {
    app_authorize_url: String,
    client_id: String,
    redirect_uri: String,
    scopes: Vec<String>,
    state: Option<String>,
    avoid_linking: bool,
}

impl AuthorizationUrlBuilder {
    /// Request a scope. Repeatable; rendered space-separated.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    /// Opaque value echoed back on the redirect for CSRF validation.
    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Ask the authorization page not to link the grant to an existing
    /// provider profile.
    #[must_use]
    pub fn avoid_linking(mut self, avoid: bool) -> Self {
        self.avoid_linking = avoid;
        self
    }

    /// Render the final URL.
    ///
    /// # Errors
    /// Returns [`MeridianError::Config`] when the configured app base URL is
    /// not parseable.
    pub fn build(self) -> Result<String> {
        let mut url = Url::parse(&self.app_authorize_url)
            .map_err(|err| MeridianError::Config(format!("invalid app base URL: {err}")))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("response_type", "code");
            query.append_pair("client_id", &self.client_id);
            query.append_pair("redirect_uri", &self.redirect_uri);
            query.append_pair("scope", &self.scopes.join(" "));
            if let Some(state) = &self.state {
                query.append_pair("state", state);
            }
            if self.avoid_linking {
                query.append_pair("avoid_linking", "true");
            }
        }

        Ok(url.into())
    }
}
