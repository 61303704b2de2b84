//! HTTP transport for the scheduling site, behind the [`CourtSite`] trait
//! so everything above it can run against a scripted implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use courtbot_core::{BookingStep, Court, Credential, Error, ResourceAvailability, Result};
use reqwest::header::USER_AGENT;
use tracing::debug;

use crate::tokens;
use crate::wire;

/// Trait for the remote operations the bot performs against the site.
#[async_trait]
pub trait CourtSite: Send + Sync {
    /// Run the login handshake for one credential.
    async fn login(&self, credential: &Credential) -> Result<SiteSession>;

    /// Minute-granularity availability for `courts` on `date`.
    async fn availability(
        &self,
        date: NaiveDate,
        courts: &[Court],
    ) -> Result<Vec<ResourceAvailability>>;

    /// Stage a reservation for `court` at `hour` (24-hour) on `date`.
    async fn stage(
        &self,
        session: &SiteSession,
        court: Court,
        hour: u8,
        date: NaiveDate,
    ) -> Result<()>;

    /// Confirm the staged reservation; returns the site's thank-you text.
    async fn confirm(&self, session: &SiteSession) -> Result<String>;
}

/// Proof of a completed login handshake for one account.
///
/// Owns the HTTP client whose jar carries the forms-auth cookie, so the
/// session belongs to exactly one credential and is never shared.
#[derive(Clone)]
pub struct SiteSession {
    username: String,
    http: reqwest::Client,
}

impl SiteSession {
    /// Account this session was established for.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// A session with no handshake behind it, for scripted transports.
    pub fn stub(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            http: reqwest::Client::new(),
        }
    }
}

impl std::fmt::Debug for SiteSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteSession")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Live implementation against the facility's ASP.NET site.
pub struct HttpCourtSite {
    base_url: String,
    /// Availability queries need no authentication, so they share one
    /// plain client instead of burning a login.
    query_client: reqwest::Client,
}

impl HttpCourtSite {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            query_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl CourtSite for HttpCourtSite {
    async fn login(&self, credential: &Credential) -> Result<SiteSession> {
        let auth_failed = |reason: String| Error::authentication(&credential.username, reason);

        let base = reqwest::Url::parse(&self.base_url)
            .map_err(|e| auth_failed(format!("invalid base url: {e}")))?;
        let jar = Arc::new(reqwest::cookie::Jar::default());
        jar.add_cookie_str(&format!("{}=dummy", wire::FORMS_AUTH_COOKIE), &base);

        let http = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()
            .map_err(|e| auth_failed(format!("client construction failed: {e}")))?;

        let response = http
            .post(self.url(wire::LOGIN_PATH))
            .header(USER_AGENT, wire::BROWSER_USER_AGENT)
            .form(&wire::login_form(credential))
            .send()
            .await
            .map_err(|e| auth_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(auth_failed(format!("status {status}")));
        }

        debug!(username = %credential.username, "login handshake accepted");
        Ok(SiteSession {
            username: credential.username.clone(),
            http,
        })
    }

    async fn availability(
        &self,
        date: NaiveDate,
        courts: &[Court],
    ) -> Result<Vec<ResourceAvailability>> {
        let response = self
            .query_client
            .post(self.url(wire::AVAILABILITY_PATH))
            .header(USER_AGENT, wire::BROWSER_USER_AGENT)
            .json(&wire::availability_query(date, courts))
            .send()
            .await
            .map_err(|e| Error::Availability(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Availability(format!("query returned status {status}")));
        }

        let envelope: wire::AvailabilityEnvelope = response
            .json()
            .await
            .map_err(|e| Error::Availability(format!("malformed response: {e}")))?;
        let resources = envelope.into_resources();
        debug!(date = %date, resources = resources.len(), "availability snapshot fetched");
        Ok(resources)
    }

    async fn stage(
        &self,
        session: &SiteSession,
        court: Court,
        hour: u8,
        date: NaiveDate,
    ) -> Result<()> {
        let payload = wire::stage_payload(court, hour, date).map_err(|e| {
            Error::booking(BookingStep::Stage, format!("payload encoding failed: {e}"))
        })?;

        let response = session
            .http
            .post(self.url(wire::STAGE_PATH))
            .header(USER_AGENT, wire::BROWSER_USER_AGENT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::booking(BookingStep::Stage, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::booking(BookingStep::Stage, format!("status {status}")));
        }

        debug!(court = court.number(), hour, "reservation staged");
        Ok(())
    }

    async fn confirm(&self, session: &SiteSession) -> Result<String> {
        let confirm_failed = |reason: String| Error::booking(BookingStep::Confirm, reason);
        let url = self.url(wire::CONFIRM_PATH);

        let response = session
            .http
            .get(&url)
            .header(USER_AGENT, wire::BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| confirm_failed(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(confirm_failed(format!("page fetch returned status {status}")));
        }
        let page = response
            .text()
            .await
            .map_err(|e| confirm_failed(e.to_string()))?;

        let tokens = tokens::hidden_fields(&page).ok_or_else(|| {
            confirm_failed("hidden tokens missing from confirm page".to_string())
        })?;

        let response = session
            .http
            .post(&url)
            .header(USER_AGENT, wire::BROWSER_USER_AGENT)
            .form(&tokens.form_fields())
            .send()
            .await
            .map_err(|e| confirm_failed(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(confirm_failed(format!("status {status}")));
        }
        let body = response
            .text()
            .await
            .map_err(|e| confirm_failed(e.to_string()))?;

        tokens::confirmation_text(&body)
            .ok_or_else(|| confirm_failed("no confirmation text in response".to_string()))
    }
}
