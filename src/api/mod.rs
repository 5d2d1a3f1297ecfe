//! HTTP client for the DJ Databass backend
//!
//! `ApiClient` wraps a `reqwest::Client` and exposes one method per endpoint.
//! The browsing view only needs the read side and the favourite writes, which
//! are collected in the `DjApi` trait so the view can be driven by any backend.

mod auth;
mod djs;
mod error;
mod favourites;
mod reference;
mod upload;

#[cfg(test)]
pub(crate) mod fake;

pub use error::{ApiError, ApiResult};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::models::{DjId, DjRecord, GenreRef, MessageBody, SubgenreRef, VenueRef};
use crate::stores::AuthContext;
use crate::utils::url;

/// Backend operations the browsing view depends on
#[async_trait]
pub trait DjApi: Send + Sync {
    /// `GET /api/djs`
    async fn fetch_djs(&self) -> ApiResult<Vec<DjRecord>>;

    /// `GET /api/genres`
    async fn fetch_genres(&self) -> ApiResult<Vec<GenreRef>>;

    /// `GET /api/genres/{genre}/subgenres`
    async fn fetch_subgenres(&self, genre: &str) -> ApiResult<Vec<SubgenreRef>>;

    /// `GET /api/venues`
    async fn fetch_venues(&self) -> ApiResult<Vec<VenueRef>>;

    /// `GET /api/me/favourites`
    async fn fetch_favourites(&self) -> ApiResult<Vec<DjRecord>>;

    /// `POST /api/me/favourites`
    async fn add_favourite(&self, dj_id: DjId) -> ApiResult<()>;

    /// `DELETE /api/me/favourites`
    async fn remove_favourite(&self, dj_id: DjId) -> ApiResult<()>;
}

/// Client for the DJ Databass REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Arc<AuthContext>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, auth: Arc<AuthContext>) -> ApiResult<Self> {
        let base_url = config.api_base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    fn url(&self, path: &str) -> String {
        url::join(&self.base_url, path)
    }

    /// Attach whatever credentials the auth context holds
    fn with_credentials(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = request;
        if let Some(token) = self.auth.token() {
            request = request.bearer_auth(token);
        }
        if let Some(cookie) = self.auth.cookie() {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        request
    }

    /// Credentialed request; fails fast when nobody is signed in
    fn credentialed(&self, request: RequestBuilder) -> ApiResult<RequestBuilder> {
        if !self.auth.is_authenticated() {
            return Err(ApiError::Unauthenticated);
        }
        Ok(self.with_credentials(request))
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await?;
        check_status(response).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send and return the backend's message text, if any
    async fn send_for_message(&self, request: RequestBuilder) -> ApiResult<Option<String>> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        let body: MessageBody = serde_json::from_slice(&bytes).unwrap_or_default();
        Ok(body.text().map(str::to_string))
    }
}

/// Map a non-2xx response to `ApiError::Status` carrying the backend's message
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = error_message(&text)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Request failed".to_string());

    tracing::debug!("Backend answered {}: {}", status, message);
    Err(ApiError::status(status.as_u16(), message))
}

/// Extract the human-readable part of an error body
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<MessageBody>(trimmed) {
        Ok(parsed) => parsed.text().map(str::to_string),
        Err(_) => Some(trimmed.to_string()),
    }
}

#[async_trait]
impl DjApi for ApiClient {
    async fn fetch_djs(&self) -> ApiResult<Vec<DjRecord>> {
        self.get_djs().await
    }

    async fn fetch_genres(&self) -> ApiResult<Vec<GenreRef>> {
        self.get_genres().await
    }

    async fn fetch_subgenres(&self, genre: &str) -> ApiResult<Vec<SubgenreRef>> {
        self.get_subgenres(genre).await
    }

    async fn fetch_venues(&self) -> ApiResult<Vec<VenueRef>> {
        self.get_venues().await
    }

    async fn fetch_favourites(&self) -> ApiResult<Vec<DjRecord>> {
        self.get_favourites().await
    }

    async fn add_favourite(&self, dj_id: DjId) -> ApiResult<()> {
        self.post_favourite(dj_id).await
    }

    async fn remove_favourite(&self, dj_id: DjId) -> ApiResult<()> {
        self.delete_favourite(dj_id).await
    }
}
