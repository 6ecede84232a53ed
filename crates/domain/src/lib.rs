//! # Vakansiya Domain
//!
//! Business domain types and models for the Vakansiya job marketplace client.
//!
//! This crate contains:
//! - Session types (credentials, token rotations)
//! - Request/response models for the marketplace API (jobs, geocoding,
//!   notifications, support tickets)
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Vakansiya crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
