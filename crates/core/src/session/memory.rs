//! In-process token store, for tests and sessions that must not outlive the
//! process.

use parking_lot::Mutex;
use vakansiya_domain::{Credentials, Result};

use super::ports::TokenStore;

/// In-process token store; nothing survives the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    stored: Mutex<Option<Credentials>>,
}

impl MemoryTokenStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a pair
    #[must_use]
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self { stored: Mutex::new(Some(credentials)) }
    }

    /// Current stored value without going through the trait
    #[must_use]
    pub fn snapshot(&self) -> Option<Credentials> {
        self.stored.lock().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<Credentials>> {
        Ok(self.stored.lock().clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        *self.stored.lock() = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.stored.lock() = None;
        Ok(())
    }
}
