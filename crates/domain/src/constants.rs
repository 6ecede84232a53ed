//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// API endpoint defaults
/// Production backend
pub const DEFAULT_API_BASE_URL: &str = "https://api.vakansiya.az";
/// Path of the token refresh exchange
pub const REFRESH_ENDPOINT_PATH: &str = "/auth/refresh";
/// User-Agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = concat!("vakansiya-client/", env!("CARGO_PKG_VERSION"));

// Keychain
/// Keychain service holding the session tokens
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "az.vakansiya.session";
/// Keychain account suffix for the token entries
pub const DEFAULT_KEYCHAIN_ACCOUNT: &str = "default";

// Logging
/// Log filter used when neither config nor `RUST_LOG` set one
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Environment variables
/// Overrides `api.base_url`
pub const ENV_API_URL: &str = "VAKANSIYA_API_URL";
/// Overrides `api.timeout_secs`
pub const ENV_API_TIMEOUT_SECS: &str = "VAKANSIYA_API_TIMEOUT_SECS";
/// Overrides `api.user_agent`
pub const ENV_USER_AGENT: &str = "VAKANSIYA_USER_AGENT";
/// Overrides `session.keychain_service`
pub const ENV_KEYCHAIN_SERVICE: &str = "VAKANSIYA_KEYCHAIN_SERVICE";
/// Overrides `logging.level`
pub const ENV_LOG_LEVEL: &str = "VAKANSIYA_LOG_LEVEL";
/// Overrides `logging.json`
pub const ENV_LOG_JSON: &str = "VAKANSIYA_LOG_JSON";
