//! HTTP client for the governance service
//!
//! Every request goes through [`ApiClient`], which attaches the session
//! header when a session exists and normalizes failures into
//! [`ConsoleError::Transport`] / [`ConsoleError::Decode`].

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::ApiConfig;
use crate::error::{ConsoleError, ConsoleResult};
use crate::session::SessionStore;

/// Header carrying the session established by role assumption
pub const SESSION_HEADER: &str = "X-Session-Id";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionStore) -> ConsoleResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| ConsoleError::Config(format!("invalid api.base_url '{}': {}", base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConsoleError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> ConsoleResult<Response> {
        let request = match self.session.session_id().await {
            Some(session_id) => request.header(SESSION_HEADER, session_id),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", path, e);
            ConsoleError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        tracing::warn!("Request to {} returned {}: {}", path, status, message);
        Err(ConsoleError::transport(Some(status.as_u16()), message))
    }

    async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> ConsoleResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!("Malformed response from {}: {}", path, e);
            ConsoleError::decode(path, e)
        })
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ConsoleResult<T> {
        tracing::debug!("GET {}", path);
        let response = self.send(self.http.get(self.url(path)), path).await?;
        Self::decode(response, path).await
    }

    /// POST a JSON body to `path` and decode the JSON response
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ConsoleResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("POST {}", path);
        let response = self.send(self.http.post(self.url(path)).json(body), path).await?;
        Self::decode(response, path).await
    }

    /// POST a JSON body to `path`, ignoring whatever the service answers on success
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ConsoleResult<()> {
        tracing::debug!("POST {}", path);
        self.send(self.http.post(self.url(path)).json(body), path).await?;
        Ok(())
    }
}

/// Prefer the service's own `message` field, fall back to the status text
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}
