//! # Vakansiya Infrastructure
//!
//! Infrastructure implementations of core ports and the backend API client.
//!
//! This crate contains:
//! - HTTP transport (reqwest)
//! - Authenticated API client with refresh-on-401 and the typed command
//!   facade
//! - Keychain token storage and sign-in lifecycle
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `vakansiya-core`
//! - Depends on `vakansiya-domain` and `vakansiya-core`
//! - Contains all "impure" code (network, keychain, filesystem)

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientConfig, ApiCommands, ApiError, ApiErrorCategory};
pub use auth::{KeychainTokenStore, PersistingRotationListener, SessionManager};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
