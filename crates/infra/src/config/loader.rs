//! Configuration loader
//!
//! Loads client configuration from an optional file plus environment
//! variables.
//!
//! ## Loading Strategy
//! 1. Probe for a config file; use built-in defaults when none exists
//! 2. Apply environment variable overrides on top
//! 3. Normalize the API base URL (trailing slashes stripped)
//!
//! ## Environment Variables
//! - `VAKANSIYA_API_URL`: API base URL
//! - `VAKANSIYA_API_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `VAKANSIYA_USER_AGENT`: User-Agent header value
//! - `VAKANSIYA_KEYCHAIN_SERVICE`: Keychain service name for stored tokens
//! - `VAKANSIYA_LOG_LEVEL`: Log filter directive
//! - `VAKANSIYA_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./vakansiya.json` or `./vakansiya.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use vakansiya_domain::constants::{
    ENV_API_TIMEOUT_SECS, ENV_API_URL, ENV_KEYCHAIN_SERVICE, ENV_LOG_JSON, ENV_LOG_LEVEL,
    ENV_USER_AGENT,
};
use vakansiya_domain::{Config, Result, VakansiyaError};

/// Load configuration from the first config file found, or defaults
///
/// Environment variables override file values.
///
/// # Errors
/// Returns `VakansiyaError::Config` if:
/// - A config file exists but cannot be read or parsed
/// - An environment variable has an invalid value
/// - The resulting base URL is empty
pub fn load() -> Result<Config> {
    let mut config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config)?;
    finish(config)
}

/// Load configuration from defaults plus environment variables only
///
/// # Errors
/// Returns `VakansiyaError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    finish(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
/// Missing sections and fields take their defaults.
///
/// # Errors
/// Returns `VakansiyaError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(VakansiyaError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            VakansiyaError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| VakansiyaError::Config(format!("Failed to read config file: {}", e)))?;

    finish(parse_config(&contents, &config_path)?)
}

/// Overlay environment variables onto `config`
///
/// Unset variables leave the existing value alone.
///
/// # Errors
/// Returns `VakansiyaError::Config` if the timeout is not a whole number.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    if let Some(url) = env_opt(ENV_API_URL) {
        config.api.base_url = url;
    }

    if let Some(raw) = env_opt(ENV_API_TIMEOUT_SECS) {
        let secs = raw.parse::<u64>().map_err(|e| {
            VakansiyaError::Config(format!("Invalid {ENV_API_TIMEOUT_SECS}: {}", e))
        })?;
        config.api.timeout_secs = Some(secs);
    }

    if let Some(agent) = env_opt(ENV_USER_AGENT) {
        config.api.user_agent = Some(agent);
    }

    if let Some(service) = env_opt(ENV_KEYCHAIN_SERVICE) {
        config.session.keychain_service = service;
    }

    if let Some(level) = env_opt(ENV_LOG_LEVEL) {
        config.logging.level = level;
    }

    config.logging.json = env_bool(ENV_LOG_JSON, config.logging.json)?;

    Ok(())
}

fn finish(mut config: Config) -> Result<Config> {
    config.api = config.api.normalized()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `VakansiyaError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| VakansiyaError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| VakansiyaError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(VakansiyaError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./vakansiya.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("vakansiya.json"),
        dir.join("vakansiya.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Non-empty environment variable value
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if unset or blank.
///
/// # Errors
/// `VakansiyaError::Config` for any other value.
fn env_bool(key: &str, default: bool) -> Result<bool> {
    let Some(raw) = env_opt(key) else {
        return Ok(default);
    };

    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(VakansiyaError::Config(format!("Invalid {key}: expected a boolean, got '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;
    use vakansiya_domain::constants::DEFAULT_API_BASE_URL;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 6] = [
        ENV_API_URL,
        ENV_API_TIMEOUT_SECS,
        ENV_USER_AGENT,
        ENV_KEYCHAIN_SERVICE,
        ENV_LOG_LEVEL,
        ENV_LOG_JSON,
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("VAKANSIYA_TEST_BOOL_TRUE", "1");
        std::env::set_var("VAKANSIYA_TEST_BOOL_UPPER", "TRUE");
        std::env::set_var("VAKANSIYA_TEST_BOOL_ON", "on");
        std::env::set_var("VAKANSIYA_TEST_BOOL_OFF", "off");

        assert!(env_bool("VAKANSIYA_TEST_BOOL_TRUE", false).unwrap());
        assert!(env_bool("VAKANSIYA_TEST_BOOL_UPPER", false).unwrap());
        assert!(env_bool("VAKANSIYA_TEST_BOOL_ON", false).unwrap());
        assert!(!env_bool("VAKANSIYA_TEST_BOOL_OFF", true).unwrap());

        std::env::remove_var("VAKANSIYA_TEST_BOOL_MISSING");
        assert!(env_bool("VAKANSIYA_TEST_BOOL_MISSING", true).unwrap());
        assert!(!env_bool("VAKANSIYA_TEST_BOOL_MISSING", false).unwrap());

        std::env::set_var("VAKANSIYA_TEST_BOOL_BLANK", "  ");
        assert!(env_bool("VAKANSIYA_TEST_BOOL_BLANK", true).unwrap());
        std::env::remove_var("VAKANSIYA_TEST_BOOL_BLANK");

        std::env::remove_var("VAKANSIYA_TEST_BOOL_TRUE");
        std::env::remove_var("VAKANSIYA_TEST_BOOL_UPPER");
        std::env::remove_var("VAKANSIYA_TEST_BOOL_ON");
        std::env::remove_var("VAKANSIYA_TEST_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let config = load_from_env().unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.api.timeout_secs, None);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_API_URL, "https://staging.vakansiya.az/");
        std::env::set_var(ENV_API_TIMEOUT_SECS, "15");
        std::env::set_var(ENV_USER_AGENT, "vakansiya-test/1.0");
        std::env::set_var(ENV_KEYCHAIN_SERVICE, "az.vakansiya.staging");
        std::env::set_var(ENV_LOG_LEVEL, "debug");
        std::env::set_var(ENV_LOG_JSON, "true");

        let result = load_from_env();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.api.base_url, "https://staging.vakansiya.az");
        assert_eq!(config.api.timeout_secs, Some(15));
        assert_eq!(config.api.user_agent.as_deref(), Some("vakansiya-test/1.0"));
        assert_eq!(config.session.keychain_service, "az.vakansiya.staging");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_from_env_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_API_TIMEOUT_SECS, "soon");
        let result = load_from_env();
        clear_env();

        assert!(matches!(result, Err(VakansiyaError::Config(_))));
    }

    #[test]
    fn test_load_from_env_invalid_log_json() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_LOG_JSON, "maybe");
        let result = load_from_env();
        clear_env();

        match result {
            Err(VakansiyaError::Config(message)) => assert!(message.contains(ENV_LOG_JSON)),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_api_url_is_ignored() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var(ENV_API_URL, "   ");
        let result = load_from_env();
        clear_env();

        assert_eq!(result.unwrap().api.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "api": {
                "base_url": "https://api.example.com/",
                "timeout_secs": 30
            },
            "logging": {
                "level": "warn"
            }
        }"#;

        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        temp_file.write_all(json_content.as_bytes()).unwrap();

        let config = load_from_file(Some(temp_file.path().to_path_buf())).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.timeout_secs, Some(30));
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.session.keychain_account, "default");
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
            [api]
            base_url = "https://api.example.com"
            user_agent = "vakansiya-android/2.1"

            [session]
            keychain_service = "az.vakansiya.android"
        "#;

        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_from_file(Some(temp_file.path().to_path_buf())).unwrap();
        assert_eq!(config.api.user_agent.as_deref(), Some("vakansiya-android/2.1"));
        assert_eq!(config.session.keychain_service, "az.vakansiya.android");
        assert_eq!(config.api.timeout_secs, None);
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/config.json")));
        assert!(matches!(result, Err(VakansiyaError::Config(_))));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        temp_file.write_all(b"{ invalid json }").unwrap();

        let err = load_from_file(Some(temp_file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON format"));
    }

    #[test]
    fn test_load_from_file_unsupported_extension() {
        let mut temp_file = NamedTempFile::with_suffix(".yaml").unwrap();
        temp_file.write_all(b"api: {}").unwrap();

        let err = load_from_file(Some(temp_file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("Unsupported config format"));
    }

    #[test]
    fn test_file_with_empty_base_url_rejected() {
        let mut temp_file = NamedTempFile::with_suffix(".json").unwrap();
        temp_file.write_all(br#"{ "api": { "base_url": "///" } }"#).unwrap();

        let result = load_from_file(Some(temp_file.path().to_path_buf()));
        assert!(matches!(result, Err(VakansiyaError::Config(_))));
    }
}
