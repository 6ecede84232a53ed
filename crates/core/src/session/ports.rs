//! Port interfaces for session management
//!
//! These traits define the boundaries between the session store and
//! whatever persists or observes credentials (keychain, UI state, tests).

use vakansiya_domain::{Credentials, Result, TokenRotation};

/// Observer notified after the refresh coordinator rotates tokens
///
/// Invoked synchronously on the task that performed the refresh, after the
/// session store already holds the new pair. Implementations must not block
/// for long and cannot fail the refresh; they log their own errors.
pub trait TokenRotationListener: Send + Sync {
    fn on_tokens_rotated(&self, rotation: &TokenRotation);
}

impl<F> TokenRotationListener for F
where
    F: Fn(&TokenRotation) + Send + Sync,
{
    fn on_tokens_rotated(&self, rotation: &TokenRotation) {
        self(rotation);
    }
}

/// Durable storage for the credential pair
pub trait TokenStore: Send + Sync {
    /// Load previously persisted credentials
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Credentials>>;

    /// Persist the pair, replacing whatever was stored
    fn save(&self, credentials: &Credentials) -> Result<()>;

    /// Remove stored credentials (idempotent)
    fn clear(&self) -> Result<()>;
}
