//! Backend API client for Vakansiya
//!
//! - [`client`]: request executor with bearer auth and refresh-on-401
//! - [`refresh`]: single-flight token refresh against `/auth/refresh`
//! - [`commands`]: one typed method per backend operation
//!
//! All transport goes through [`crate::http::HttpClient`]; nothing here talks
//! to reqwest directly except header constants.

pub mod client;
pub mod commands;
pub mod errors;
pub mod refresh;
pub mod request;

pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use commands::ApiCommands;
pub use errors::{ApiError, ApiErrorCategory};
pub use refresh::RefreshCoordinator;
pub use request::{Attempt, RequestDescriptor};
