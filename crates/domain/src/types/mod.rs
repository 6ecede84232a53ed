//! Domain data types
//!
//! Field names follow the backend's camelCase JSON; optional fields are
//! omitted from request bodies when unset.

pub mod auth;
pub mod geo;
pub mod jobs;
pub mod notifications;
pub mod session;
pub mod support;

pub use auth::*;
pub use geo::*;
pub use jobs::*;
pub use notifications::*;
pub use session::*;
pub use support::*;
