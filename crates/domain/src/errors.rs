//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Vakansiya
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum VakansiyaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl VakansiyaError {
    /// The message without the category prefix
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Config(message)
            | Self::Network(message)
            | Self::Auth(message)
            | Self::Storage(message)
            | Self::Serialization(message)
            | Self::NotFound(message)
            | Self::InvalidInput(message)
            | Self::Internal(message) => message,
        }
    }
}

impl From<serde_json::Error> for VakansiyaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for Vakansiya operations
pub type Result<T> = std::result::Result<T, VakansiyaError>;
