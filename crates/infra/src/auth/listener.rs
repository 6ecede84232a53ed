use std::sync::Arc;

use tracing::{debug, warn};
use vakansiya_core::{TokenRotationListener, TokenStore};
use vakansiya_domain::TokenRotation;

/// Rotation listener that persists every refreshed pair
///
/// Storage failures are logged and swallowed; the in-memory session already
/// holds the new pair and stays usable for the lifetime of the process.
pub struct PersistingRotationListener<S: TokenStore + ?Sized> {
    store: Arc<S>,
}

impl<S: TokenStore + ?Sized> PersistingRotationListener<S> {
    /// Listener writing rotations to `store`
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: TokenStore + ?Sized> TokenRotationListener for PersistingRotationListener<S> {
    fn on_tokens_rotated(&self, rotation: &TokenRotation) {
        match self.store.save(&rotation.credentials) {
            Ok(()) => debug!("Persisted rotated credentials"),
            Err(e) => warn!(error = %e, "Failed to persist rotated credentials"),
        }
    }
}
