//! In-memory session store
//!
//! Holds the access/refresh token pair and the rotation listener. One
//! instance is shared (`Arc<SessionStore>`) between the API client, the
//! refresh coordinator and the session manager; nothing here is global.
//!
//! The pair lives behind a single lock so a rotation replaces both tokens in
//! one transition and readers never see a mixed pair.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;
use vakansiya_domain::{Credentials, TokenRotation};

use super::ports::TokenRotationListener;

/// Shared credential state
#[derive(Default)]
pub struct SessionStore {
    credentials: RwLock<Credentials>,
    listener: RwLock<Option<Arc<dyn TokenRotationListener>>>,
}

impl SessionStore {
    /// Create an empty store (no tokens, no listener)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with existing credentials
    #[must_use]
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self { credentials: RwLock::new(credentials), listener: RwLock::new(None) }
    }

    /// Replace the access token; `None` clears it
    pub fn set_access_token(&self, token: Option<String>) {
        self.credentials.write().access_token = token;
    }

    /// Replace the refresh token; `None` clears it
    pub fn set_refresh_token(&self, token: Option<String>) {
        self.credentials.write().refresh_token = token;
    }

    /// Replace both tokens at once
    pub fn set_credentials(&self, credentials: Credentials) {
        *self.credentials.write() = credentials;
    }

    /// Drop both tokens
    pub fn clear(&self) {
        *self.credentials.write() = Credentials::default();
        debug!("Session credentials cleared");
    }

    /// Register the rotation listener, returning the one it displaces
    pub fn set_rotation_listener(
        &self,
        listener: Option<Arc<dyn TokenRotationListener>>,
    ) -> Option<Arc<dyn TokenRotationListener>> {
        std::mem::replace(&mut *self.listener.write(), listener)
    }

    /// Whether a rotation listener is registered
    #[must_use]
    pub fn has_rotation_listener(&self) -> bool {
        self.listener.read().is_some()
    }

    /// Snapshot of the current pair
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        self.credentials.read().clone()
    }

    /// Current access token, if any
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.credentials.read().access_token.clone()
    }

    /// Current refresh token, if any
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.credentials.read().refresh_token.clone()
    }

    /// True when an access token is held
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credentials.read().access_token.is_some()
    }

    /// Install a rotated pair, then notify the listener
    ///
    /// The listener runs after the write lock is released, so it may read the
    /// store freely.
    pub fn apply_rotation(&self, rotation: &TokenRotation) {
        *self.credentials.write() = rotation.credentials.clone();

        let listener = self.listener.read().clone();
        if let Some(listener) = listener {
            listener.on_tokens_rotated(rotation);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("credentials", &*self.credentials.read())
            .field("has_listener", &self.has_rotation_listener())
            .finish()
    }
}
