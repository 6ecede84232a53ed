//! API-specific error types
//!
//! Three outcomes reach callers: the request never got a response
//! (`Network`), the token refresh was refused or impossible (`Auth`), or the
//! server answered with a non-2xx status (`Api`). None of them is retried
//! automatically.

use reqwest::StatusCode;
use thiserror::Error;
use vakansiya_domain::VakansiyaError;

/// Categories of API errors, for presentation in the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// No response received
    Network,
    /// Session expired or refresh refused (401/403, failed refresh)
    Authentication,
    /// Request rejected (4xx)
    Client,
    /// Backend failure (5xx)
    Server,
    /// Local misconfiguration or (de)serialization failure
    Internal,
}

/// API operation errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure; the message carries the cause and the target URL
    #[error("Network error: {message}")]
    Network { message: String },

    /// Refresh token missing or rejected
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Non-2xx response after refresh handling
    ///
    /// `message` is the body's `error` field when present, otherwise
    /// `HTTP <status>`.
    #[error("{message}")]
    Api { status: u16, message: String, body: serde_json::Value },

    /// Request body could not be encoded, or a successful response does not
    /// match the expected type
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build the transport error, appending the resolved URL for diagnosis.
    pub fn network(reason: impl std::fmt::Display, url: &str) -> Self {
        Self::Network { message: format!("{reason} (url: {url})") }
    }

    /// Build the status error from a parsed response envelope.
    pub fn from_response(status: StatusCode, body: serde_json::Value) -> Self {
        let message = server_error_message(&body)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        Self::Api { status: status.as_u16(), message, body }
    }

    /// HTTP status, for `Api` errors
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::Network { .. } => ApiErrorCategory::Network,
            Self::Auth(_) => ApiErrorCategory::Authentication,
            Self::Api { status, .. } => match *status {
                401 | 403 => ApiErrorCategory::Authentication,
                500..=599 => ApiErrorCategory::Server,
                _ => ApiErrorCategory::Client,
            },
            Self::Serialization(_) | Self::Config(_) => ApiErrorCategory::Internal,
        }
    }

    /// True when the session can no longer be used and the user must sign in
    pub fn requires_sign_in(&self) -> bool {
        self.category() == ApiErrorCategory::Authentication
    }
}

/// `error` string from a JSON error body, if any
pub(crate) fn server_error_message(body: &serde_json::Value) -> Option<String> {
    body.get("error").and_then(serde_json::Value::as_str).map(str::to_string)
}

impl From<ApiError> for VakansiyaError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network { message } => Self::Network(message),
            ApiError::Auth(message) => Self::Auth(message),
            ApiError::Api { status: 401 | 403, message, .. } => Self::Auth(message),
            ApiError::Api { status: 404, message, .. } => Self::NotFound(message),
            ApiError::Api { status, message, .. } if status < 500 => Self::InvalidInput(message),
            ApiError::Api { message, .. } => Self::Internal(message),
            ApiError::Serialization(message) => Self::Serialization(message),
            ApiError::Config(message) => Self::Config(message),
        }
    }
}
