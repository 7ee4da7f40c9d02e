//! Request payloads and the "validate and parse, or reject" capability.
//!
//! Inputs are parsed from JSON and then checked with [`Validate`]; a failure
//! at either step is a [`ValidationError`]. Responses are parsed into the
//! expected record type; a shape mismatch is an [`ApiError::Protocol`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::types::download::DownloadStatus;
use crate::types::errors::{ApiError, ValidationError};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Payload-level checks beyond what the type already enforces.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Parses and validates an inbound payload.
pub fn parse_input<T: DeserializeOwned + Validate>(value: Value) -> Result<T, ValidationError> {
    let parsed: T =
        serde_json::from_value(value).map_err(|e| ValidationError::new("body", e.to_string()))?;
    parsed.validate()?;
    Ok(parsed)
}

/// Parses a response body into the expected shape.
pub fn parse_response<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Protocol(e.to_string()))
}

fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

/// Accepts only absolute `http`/`https` addresses.
pub fn validate_proxy_target(raw: &str) -> Result<Url, ValidationError> {
    let url = Url::parse(raw).map_err(|e| ValidationError::new("url", e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ValidationError::new(
            "url",
            format!("unsupported scheme '{}'", other),
        )),
    }
}

/// Query of the proxy route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyQuery {
    pub url: String,
}

impl Validate for ProxyQuery {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_proxy_target(&self.url).map(|_| ())
    }
}

/// Body of `feedback.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertFeedback {
    pub message: String,
    pub rating: i64,
}

impl Validate for InsertFeedback {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("message", &self.message)?;
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ValidationError::new(
                "rating",
                format!("must be between {} and {}", MIN_RATING, MAX_RATING),
            ));
        }
        Ok(())
    }
}

/// Body of `history.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertHistory {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Validate for InsertHistory {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("url", &self.url)
    }
}

/// Body of `downloads.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertDownload {
    pub filename: String,
    pub url: String,
    pub status: DownloadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl Validate for InsertDownload {
    fn validate(&self) -> Result<(), ValidationError> {
        require_non_empty("filename", &self.filename)?;
        require_non_empty("url", &self.url)
    }
}

/// Body of `downloads.update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDownload {
    pub status: DownloadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f64>,
}

impl Validate for UpdateDownload {
    fn validate(&self) -> Result<(), ValidationError> {
        match self.progress {
            Some(p) if !p.is_finite() || !(0.0..=100.0).contains(&p) => Err(
                ValidationError::new("progress", "must be between 0 and 100"),
            ),
            _ => Ok(()),
        }
    }
}

/// Error payload returned by every failing route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}
