//! Endpoint wrappers for the Meridian REST API
//!
//! One method per operation. Each builds the URL and body, hands the
//! prepared request to the transport, maps the status, and decodes the
//! response model. Paged listings (events, free-busy) follow `next_page`
//! URLs transparently.

use std::sync::Arc;

use meridian_domain::{
    Account, AvailablePeriod, Calendar, Channel, Event, EventsPage, FreeBusy, FreeBusyPage,
    MeridianError, Profile, Result, UserInfo,
};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::data_centre::{DataCentre, UrlProvider};
use crate::http::{ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport};
use crate::requests::{AvailabilityRequest, FreeBusyQuery, ReadEventsQuery, UpsertEventRequest};

/// Authorized API client.
///
/// Holds one account's access token. Cloning is cheap; the transport is
/// shared. All calls are independent, stateless HTTP requests.
#[derive(Clone)]
pub struct Client {
    access_token: String,
    urls: UrlProvider,
    transport: Arc<dyn HttpTransport>,
}

impl Client {
    /// Client for the default data centre using the default transport.
    ///
    /// # Errors
    /// Returns [`MeridianError::Config`] if the transport cannot be built.
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::for_data_centre(access_token, DataCentre::default())
    }

    /// Client pinned to a specific data centre.
    ///
    /// # Errors
    /// Returns [`MeridianError::Config`] if the transport cannot be built.
    pub fn for_data_centre(
        access_token: impl Into<String>,
        data_centre: DataCentre,
    ) -> Result<Self> {
        Ok(Self::with_transport(
            access_token,
            UrlProvider::for_data_centre(data_centre),
            Arc::new(ReqwestTransport::new()?),
        ))
    }

    /// Client with explicit base URLs and transport (stub servers, custom
    /// HTTP stacks).
    pub fn with_transport(
        access_token: impl Into<String>,
        urls: UrlProvider,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self { access_token: access_token.into(), urls, transport }
    }

    /// `GET /v1/account` — the authorized account.
    pub async fn account(&self) -> Result<Account> {
        #[derive(Deserialize)]
        struct Envelope {
            account: Account,
        }

        let response = self.get("/v1/account", &[]).await?;
        Ok(response.json::<Envelope>()?.account)
    }

    /// `GET /v1/userinfo` — identity of the token's subject.
    pub async fn user_info(&self) -> Result<UserInfo> {
        self.get("/v1/userinfo", &[]).await?.json()
    }

    /// `GET /v1/profiles` — all connected provider profiles.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>> {
        #[derive(Deserialize)]
        struct Envelope {
            profiles: Vec<Profile>,
        }

        let response = self.get("/v1/profiles", &[]).await?;
        Ok(response.json::<Envelope>()?.profiles)
    }

    /// `GET /v1/calendars` — all calendars across the account's profiles.
    pub async fn list_calendars(&self) -> Result<Vec<Calendar>> {
        #[derive(Deserialize)]
        struct Envelope {
            calendars: Vec<Calendar>,
        }

        let response = self.get("/v1/calendars", &[]).await?;
        Ok(response.json::<Envelope>()?.calendars)
    }

    /// `POST /v1/calendars` — create a calendar within a profile.
    pub async fn create_calendar(
        &self,
        profile_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Calendar> {
        #[derive(Deserialize)]
        struct Envelope {
            calendar: Calendar,
        }

        let body =
            serde_json::json!({ "profile_id": profile_id.into(), "name": name.into() });
        let response = self.post_json("/v1/calendars", &body).await?;
        Ok(response.json::<Envelope>()?.calendar)
    }

    /// `GET /v1/events` — read events, following pagination to exhaustion.
    pub async fn read_events(&self, query: &ReadEventsQuery) -> Result<Vec<Event>> {
        let first: EventsPage = self.get("/v1/events", &query.to_query_pairs()).await?.json()?;

        let mut events = first.events;
        let mut next_page = first.pages.next_page;

        while let Some(page_url) = next_page {
            debug!(%page_url, "following events page");
            let page: EventsPage = self.get_absolute(&page_url).await?.json()?;
            events.extend(page.events);
            next_page = page.pages.next_page;
        }

        Ok(events)
    }

    /// `POST /v1/calendars/{calendar_id}/events` — create or update the
    /// event keyed by the request's `event_id`.
    pub async fn upsert_event(
        &self,
        calendar_id: &str,
        request: &UpsertEventRequest,
    ) -> Result<()> {
        let path = format!("/v1/calendars/{calendar_id}/events");
        self.post_json(&path, request).await?;
        Ok(())
    }

    /// `DELETE /v1/calendars/{calendar_id}/events` — delete a managed event
    /// by its caller-chosen id.
    pub async fn delete_event(&self, calendar_id: &str, event_id: &str) -> Result<()> {
        let path = format!("/v1/calendars/{calendar_id}/events");
        let body = serde_json::json!({ "event_id": event_id });
        let request =
            ApiRequest::new(Method::DELETE, self.urls.api_url(&path))
                .bearer(&self.access_token)
                .json(&body)?;
        self.execute(request).await?;
        Ok(())
    }

    /// `GET /v1/free_busy` — busy periods, following pagination.
    pub async fn free_busy(&self, query: &FreeBusyQuery) -> Result<Vec<FreeBusy>> {
        let first: FreeBusyPage =
            self.get("/v1/free_busy", &query.to_query_pairs()).await?.json()?;

        let mut periods = first.free_busy;
        let mut next_page = first.pages.next_page;

        while let Some(page_url) = next_page {
            debug!(%page_url, "following free-busy page");
            let page: FreeBusyPage = self.get_absolute(&page_url).await?.json()?;
            periods.extend(page.free_busy);
            next_page = page.pages.next_page;
        }

        Ok(periods)
    }

    /// `POST /v1/availability` — compute periods where the participant
    /// requirements are met.
    pub async fn availability(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<Vec<AvailablePeriod>> {
        #[derive(Deserialize)]
        struct Envelope {
            available_periods: Vec<AvailablePeriod>,
        }

        let response = self.post_json("/v1/availability", request).await?;
        Ok(response.json::<Envelope>()?.available_periods)
    }

    /// `POST /v1/channels` — register a push-notification channel.
    pub async fn create_channel(&self, callback_url: impl Into<String>) -> Result<Channel> {
        #[derive(Deserialize)]
        struct Envelope {
            channel: Channel,
        }

        let body = serde_json::json!({ "callback_url": callback_url.into() });
        let response = self.post_json("/v1/channels", &body).await?;
        Ok(response.json::<Envelope>()?.channel)
    }

    /// `GET /v1/channels` — list active channels.
    pub async fn list_channels(&self) -> Result<Vec<Channel>> {
        #[derive(Deserialize)]
        struct Envelope {
            channels: Vec<Channel>,
        }

        let response = self.get("/v1/channels", &[]).await?;
        Ok(response.json::<Envelope>()?.channels)
    }

    /// `DELETE /v1/channels/{channel_id}` — close a channel.
    pub async fn close_channel(&self, channel_id: &str) -> Result<()> {
        let path = format!("/v1/channels/{channel_id}");
        let request = ApiRequest::new(Method::DELETE, self.urls.api_url(&path))
            .bearer(&self.access_token);
        self.execute(request).await?;
        Ok(())
    }

    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<ApiResponse> {
        let mut url = Url::parse(&self.urls.api_url(path))
            .map_err(|err| MeridianError::Config(format!("invalid API base URL: {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let request = ApiRequest::new(Method::GET, url).bearer(&self.access_token);
        self.execute(request).await
    }

    async fn get_absolute(&self, url: &str) -> Result<ApiResponse> {
        let request = ApiRequest::new(Method::GET, url).bearer(&self.access_token);
        self.execute(request).await
    }

    async fn post_json(&self, path: &str, body: &impl serde::Serialize) -> Result<ApiResponse> {
        let request = ApiRequest::new(Method::POST, self.urls.api_url(path))
            .bearer(&self.access_token)
            .json(body)?;
        self.execute(request).await
    }

    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let response = self.transport.execute(request).await?;
        map_status(response)
    }
}

/// Map a non-2xx response into the SDK error surface. 401/403 are
/// authentication problems; everything else keeps the status and body for
/// the caller.
fn map_status(response: ApiResponse) -> Result<ApiResponse> {
    match response.status {
        status if (200..300).contains(&status) => Ok(response),
        401 | 403 => Err(MeridianError::Auth(response.body)),
        status => Err(MeridianError::Api { status, body: response.body }),
    }
}
