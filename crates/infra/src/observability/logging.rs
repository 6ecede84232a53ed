//! Tracing subscriber installation
//!
//! `RUST_LOG`, when set, wins over the configured level so a single run can
//! be made verbose without editing config.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use vakansiya_domain::{LoggingConfig, Result, VakansiyaError};

/// Filter from `RUST_LOG`, else from the configured directive
///
/// # Errors
/// Returns `VakansiyaError::Config` if the configured directive is invalid.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level)
        .map_err(|e| VakansiyaError::Config(format!("Invalid log level '{}': {}", config.level, e)))
}

/// Install the global subscriber (text or JSON output)
///
/// # Errors
/// Returns `VakansiyaError::Config` if the filter is invalid or a global
/// subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry.with(fmt::layer().json().with_current_span(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| VakansiyaError::Config(format!("Failed to install tracing subscriber: {}", e)))
}
