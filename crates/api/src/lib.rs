//! Vakansiya client composition root
//!
//! Wires configuration, the session store, token persistence and the API
//! client into one [`AppContext`] that a UI shell or the bundled CLI holds for
//! the lifetime of the process.

pub mod context;

pub use context::AppContext;
