//! # Vakansiya Core
//!
//! Pure session logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The in-memory session store shared by the API client
//! - Port interfaces (traits) for token rotation and token persistence
//!
//! ## Architecture Principles
//! - Only depends on `vakansiya-domain`
//! - No HTTP, keychain, or platform code
//! - All external dependencies via traits

pub mod session;

pub use session::memory::MemoryTokenStore;
pub use session::ports::{TokenRotationListener, TokenStore};
pub use session::store::SessionStore;
