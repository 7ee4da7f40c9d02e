//! HTTP server for the tabshell API.
//!
//! Serves the proxy route and the feedback/history/downloads CRUD routes
//! from the shared route table. Every failure is answered with a
//! `{message}` body; upstream pages relayed by the proxy keep their own
//! status and body and are marked with the upstream-status header.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::api::routes::{
    DOWNLOADS_LIST, DOWNLOADS_UPDATE, FEEDBACK_CREATE, HISTORY_LIST, PROXY_FETCH,
    UPSTREAM_STATUS_HEADER,
};
use crate::api::schema::{
    parse_input, ErrorBody, InsertDownload, InsertFeedback, InsertHistory, ProxyQuery,
    UpdateDownload, Validate,
};
use crate::database::Database;
use crate::managers::download_manager::{DownloadManager, DownloadManagerTrait};
use crate::managers::feedback_manager::{FeedbackManager, FeedbackManagerTrait};
use crate::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use crate::services::proxy_service::ProxyService;
use crate::types::download::DownloadRecord;
use crate::types::errors::{ProxyError, StoreError, ValidationError};
use crate::types::feedback::Feedback;
use crate::types::history::HistoryRecord;

/// Shared state passed to every handler.
#[derive(Clone)]
pub struct ServerState {
    pub db: Arc<Mutex<Database>>,
    pub proxy: Arc<ProxyService>,
}

impl ServerState {
    pub fn new(db: Database, proxy: ProxyService) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            proxy: Arc::new(proxy),
        }
    }
}

/// A failed request: status plus the message for the `{message}` body.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: String,
}

impl ApiFailure {
    fn internal(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { message: self.message })).into_response()
    }
}

impl From<ValidationError> for ApiFailure {
    fn from(err: ValidationError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for ApiFailure {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            StoreError::Database(_) => {
                tracing::error!(error = %err, "storage failure");
                Self::internal(&err.to_string())
            }
        }
    }
}

impl From<ProxyError> for ApiFailure {
    fn from(err: ProxyError) -> Self {
        match err {
            ProxyError::InvalidTarget(invalid) => invalid.into(),
            other => {
                tracing::warn!(error = %other, "proxy fetch failed");
                Self::internal(&other.to_string())
            }
        }
    }
}

type ApiResult<T> = Result<(StatusCode, Json<T>), ApiFailure>;

fn parse_body<T: DeserializeOwned + Validate>(body: &Bytes) -> Result<T, ApiFailure> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ValidationError::new("body", e.to_string()))?;
    Ok(parse_input(value)?)
}

/// Runs `f` against the database while holding the lock.
fn with_db<T, F>(state: &ServerState, f: F) -> Result<T, ApiFailure>
where
    F: FnOnce(&Connection) -> Result<T, StoreError>,
{
    let db = state
        .db
        .lock()
        .map_err(|_| ApiFailure::internal("database lock poisoned"))?;
    Ok(f(db.connection())?)
}

/// Builds the router over the shared route table.
pub fn build_router(state: ServerState) -> Router {
    Router::new()
        .route(PROXY_FETCH.path, get(proxy_fetch))
        .route(FEEDBACK_CREATE.path, post(create_feedback))
        .route(HISTORY_LIST.path, get(list_history).post(create_history))
        .route(DOWNLOADS_LIST.path, get(list_downloads).post(create_download))
        .route(&DOWNLOADS_UPDATE.axum_path(), patch(update_download))
        .route("/health", get(health))
        .with_state(state)
}

/// Serves the API on `listener` until the task is dropped.
pub async fn serve(listener: TcpListener, state: ServerState) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "tabshell server listening");
    axum::serve(listener, build_router(state)).await
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

async fn proxy_fetch(
    State(state): State<ServerState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ApiFailure> {
    let query = ProxyQuery {
        url: params
            .get("url")
            .cloned()
            .ok_or_else(|| ValidationError::new("url", "is required"))?,
    };
    query.validate()?;

    let page = state.proxy.fetch(&query.url).await?;
    let status = StatusCode::from_u16(page.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let headers = [
        (header::CONTENT_TYPE, page.content_type),
        (HeaderName::from_static(UPSTREAM_STATUS_HEADER), page.status.to_string()),
    ];
    Ok((status, headers, page.body).into_response())
}

async fn create_feedback(State(state): State<ServerState>, body: Bytes) -> ApiResult<Feedback> {
    let input: InsertFeedback = parse_body(&body)?;
    let record = with_db(&state, |conn| FeedbackManager::new(conn).create(&input))?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_history(State(state): State<ServerState>) -> ApiResult<Vec<HistoryRecord>> {
    let records = with_db(&state, |conn| HistoryManager::new(conn).list())?;
    Ok((StatusCode::OK, Json(records)))
}

async fn create_history(State(state): State<ServerState>, body: Bytes) -> ApiResult<HistoryRecord> {
    let input: InsertHistory = parse_body(&body)?;
    let record = with_db(&state, |conn| HistoryManager::new(conn).create(&input))?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_downloads(State(state): State<ServerState>) -> ApiResult<Vec<DownloadRecord>> {
    let records = with_db(&state, |conn| DownloadManager::new(conn).list())?;
    Ok((StatusCode::OK, Json(records)))
}

async fn create_download(State(state): State<ServerState>, body: Bytes) -> ApiResult<DownloadRecord> {
    let input: InsertDownload = parse_body(&body)?;
    let record = with_db(&state, |conn| DownloadManager::new(conn).create(&input))?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_download(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<DownloadRecord> {
    let id: i64 = id
        .parse()
        .map_err(|_| ValidationError::new("id", "must be an integer"))?;
    let input: UpdateDownload = parse_body(&body)?;
    let record = with_db(&state, |conn| DownloadManager::new(conn).update(id, &input))?;
    Ok((StatusCode::OK, Json(record)))
}
