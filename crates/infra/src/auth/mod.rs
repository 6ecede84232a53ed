//! Session persistence and sign-in flows
//!
//! - [`KeychainTokenStore`]: credential pair in the platform keychain
//! - [`PersistingRotationListener`]: writes refreshed pairs to a store
//! - [`SessionManager`]: restore, sign in, sign up and sign out

pub mod keychain;
pub mod listener;
pub mod session;

pub use keychain::KeychainTokenStore;
pub use listener::PersistingRotationListener;
pub use session::SessionManager;
