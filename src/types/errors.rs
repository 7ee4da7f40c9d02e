use thiserror::Error;

/// Description shown to the user when a response cannot be interpreted.
pub const UNKNOWN_ERROR: &str = "Unknown error";

// === ValidationError ===

/// A payload failed its schema checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// === ApiError ===

/// Errors raised by calls to a remote capability.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The outbound payload was rejected before anything was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    /// Network failure or a non-success status.
    #[error("Request failed: {message}")]
    Transport { status: Option<u16>, message: String },
    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Protocol(String),
}

impl ApiError {
    /// Text for the notification channel. Protocol errors are never
    /// partially interpreted.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(err) => err.to_string(),
            ApiError::Transport { message, .. } => message.clone(),
            ApiError::Protocol(_) => UNKNOWN_ERROR.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

// === StoreError ===

/// Errors raised by the SQLite-backed record managers.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(i64),
    #[error("Storage database error: {0}")]
    Database(#[from] rusqlite::Error),
}

// === ProxyError ===

/// Errors raised while fetching upstream content for the proxy route.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error(transparent)]
    InvalidTarget(#[from] ValidationError),
    #[error("Failed to fetch upstream content: {0}")]
    Upstream(String),
    #[error("Upstream content exceeds {0} bytes")]
    TooLarge(usize),
}

// === SettingsError ===

/// Errors related to loading and saving shell settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings I/O error: {0}")]
    IoError(String),
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
}
