//! Configuration structures
//!
//! Loaded by `vakansiya_infra::config`. Every section has defaults so a
//! partial file (or no file at all) still yields a usable configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_KEYCHAIN_ACCOUNT, DEFAULT_KEYCHAIN_SERVICE, DEFAULT_LOG_LEVEL,
};
use crate::errors::{Result, VakansiyaError};

/// Top-level client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection
    #[serde(default)]
    pub api: ApiConfig,
    /// Token persistence
    #[serde(default)]
    pub session: SessionConfig,
    /// Tracing subscriber
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every request path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; `None` leaves timing to the transport
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// User-Agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_secs: None, user_agent: None }
    }
}

impl ApiConfig {
    /// Strip trailing slashes from the base URL.
    ///
    /// # Errors
    /// Returns `VakansiyaError::Config` if nothing but slashes remains.
    pub fn normalized(mut self) -> Result<Self> {
        self.base_url = normalize_base_url(&self.base_url)?;
        Ok(self)
    }
}

/// Session persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Keychain service name
    #[serde(default = "default_keychain_service")]
    pub keychain_service: String,
    /// Account suffix of the token entries
    #[serde(default = "default_keychain_account")]
    pub keychain_account: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            keychain_service: default_keychain_service(),
            keychain_account: default_keychain_account(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `vakansiya_infra=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of text
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

/// Trim whitespace and trailing slashes from a base URL.
///
/// # Errors
/// Returns `VakansiyaError::Config` if the result is empty.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(VakansiyaError::Config("API base URL is empty".to_string()));
    }
    Ok(trimmed.to_string())
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_keychain_service() -> String {
    DEFAULT_KEYCHAIN_SERVICE.to_string()
}

fn default_keychain_account() -> String {
    DEFAULT_KEYCHAIN_ACCOUNT.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
