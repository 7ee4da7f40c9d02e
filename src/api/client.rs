//! HTTP client for the tabshell API.
//!
//! Every call validates its payload before anything is sent, maps
//! non-success statuses to [`ApiError::Transport`] (no retries), and parses
//! the body into the expected record type.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::routes::{
    build_url, proxy_url, HttpMethod, Route, DOWNLOADS_CREATE, DOWNLOADS_LIST, DOWNLOADS_UPDATE,
    FEEDBACK_CREATE, HISTORY_CREATE, HISTORY_LIST, PROXY_FETCH, UPSTREAM_STATUS_HEADER,
};
use super::schema::{
    parse_response, validate_proxy_target, ErrorBody, InsertDownload, InsertFeedback,
    InsertHistory, UpdateDownload, Validate,
};
use crate::services::content_host::ContentFetcher;
use crate::types::download::DownloadRecord;
use crate::types::errors::{ApiError, ValidationError, UNKNOWN_ERROR};
use crate::types::feedback::Feedback;
use crate::types::history::HistoryRecord;

/// Client for the feedback, history, downloads and proxy routes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport {
        status: err.status().map(|s| s.as_u16()),
        message: err.to_string(),
    }
}

/// Builds a transport error from a non-success response, preferring the
/// server's `{message}` body.
async fn error_from_response(route: &Route, response: Response) -> ApiError {
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => UNKNOWN_ERROR.to_string(),
    };
    tracing::warn!(route = route.name, status = status.as_u16(), %message, "request failed");
    ApiError::Transport {
        status: Some(status.as_u16()),
        message,
    }
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build().map_err(transport)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send_raw(&self, route: &Route, path: &str, body: Option<Value>) -> Result<Response, ApiError> {
        let method = match route.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
        };
        let mut request = self.http.request(method, self.endpoint(path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        request.send().await.map_err(transport)
    }

    async fn send(&self, route: &Route, path: &str, body: Option<Value>) -> Result<Response, ApiError> {
        let response = self.send_raw(route, path, body).await?;
        if !response.status().is_success() {
            return Err(error_from_response(route, response).await);
        }
        Ok(response)
    }

    async fn read_json<T: DeserializeOwned>(&self, route: &Route, path: &str, body: Option<Value>) -> Result<T, ApiError> {
        let response = self.send(route, path, body).await?;
        let value: Value = response
            .json()
            .await
            .map_err(|e| ApiError::Protocol(e.to_string()))?;
        parse_response(value)
    }

    async fn submit<B, T>(&self, route: &Route, path: &str, input: &B) -> Result<T, ApiError>
    where
        B: Serialize + Validate,
        T: DeserializeOwned,
    {
        input.validate()?;
        let body = serde_json::to_value(input).map_err(|e| ValidationError::new("body", e.to_string()))?;
        self.read_json(route, path, Some(body)).await
    }

    pub async fn create_feedback(&self, input: &InsertFeedback) -> Result<Feedback, ApiError> {
        self.submit(&FEEDBACK_CREATE, FEEDBACK_CREATE.path, input).await
    }

    pub async fn list_history(&self) -> Result<Vec<HistoryRecord>, ApiError> {
        self.read_json(&HISTORY_LIST, HISTORY_LIST.path, None).await
    }

    pub async fn record_visit(&self, input: &InsertHistory) -> Result<HistoryRecord, ApiError> {
        self.submit(&HISTORY_CREATE, HISTORY_CREATE.path, input).await
    }

    pub async fn list_downloads(&self) -> Result<Vec<DownloadRecord>, ApiError> {
        self.read_json(&DOWNLOADS_LIST, DOWNLOADS_LIST.path, None).await
    }

    pub async fn create_download(&self, input: &InsertDownload) -> Result<DownloadRecord, ApiError> {
        self.submit(&DOWNLOADS_CREATE, DOWNLOADS_CREATE.path, input).await
    }

    pub async fn update_download(&self, id: i64, input: &UpdateDownload) -> Result<DownloadRecord, ApiError> {
        let id = id.to_string();
        let path = build_url(DOWNLOADS_UPDATE.path, &[("id", id.as_str())]);
        self.submit(&DOWNLOADS_UPDATE, &path, input).await
    }

    /// Fetches `target` through the proxy route and returns the content.
    ///
    /// Upstream error pages (a relayed 404, say) are content like any other;
    /// only the proxy's own failures are errors.
    pub async fn fetch_proxy(&self, target: &str) -> Result<String, ApiError> {
        validate_proxy_target(target)?;
        let response = self.send_raw(&PROXY_FETCH, &proxy_url(target), None).await?;
        let relayed = response.headers().contains_key(UPSTREAM_STATUS_HEADER);
        if !relayed && !response.status().is_success() {
            return Err(error_from_response(&PROXY_FETCH, response).await);
        }
        if !response.status().is_success() {
            tracing::debug!(location = %target, status = response.status().as_u16(), "relaying upstream error page");
        }
        response.text().await.map_err(transport)
    }
}

#[async_trait]
impl ContentFetcher for ApiClient {
    async fn fetch(&self, location: &str) -> Result<String, ApiError> {
        self.fetch_proxy(location).await
    }
}
