//! Observability setup
//!
//! All crates emit `tracing` events; the binary installs the subscriber once
//! at startup through [`init_tracing`].

pub mod logging;

pub use logging::{build_filter, init_tracing};
