//! Keychain-backed token store
//!
//! Each token lives in its own entry under the configured service name:
//! `access.{account}` and `refresh.{account}`. A missing entry is an absent
//! token, not an error.
//!
//! Every write is read back through a fresh entry. A backend that does not
//! retain credentials across entries (keyring's mock store, used when no
//! platform feature is compiled in) turns `save` into a storage error.

use keyring::Entry;
use tracing::{debug, warn};
use vakansiya_core::TokenStore;
use vakansiya_domain::constants::{DEFAULT_KEYCHAIN_ACCOUNT, DEFAULT_KEYCHAIN_SERVICE};
use vakansiya_domain::{Credentials, Result, SessionConfig, VakansiyaError};

use crate::errors::InfraError;

/// Token store backed by the OS keychain
#[derive(Debug, Clone)]
pub struct KeychainTokenStore {
    service: String,
    account: String,
}

impl KeychainTokenStore {
    /// Store scoped to `service` with entries keyed by `account`
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self { service: service.into(), account: account.into() }
    }

    /// Store using the keychain names from session config
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.keychain_service.clone(), config.keychain_account.clone())
    }

    /// Keychain service name
    pub fn service(&self) -> &str {
        &self.service
    }

    fn access_key(&self) -> String {
        format!("access.{}", self.account)
    }

    fn refresh_key(&self) -> String {
        format!("refresh.{}", self.account)
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service, key).map_err(|e| VakansiyaError::from(InfraError::from(e)))
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(InfraError::from(e).into()),
        }
    }

    fn write(&self, key: &str, value: Option<&str>) -> Result<()> {
        match value {
            Some(value) => {
                self.entry(key)?
                    .set_password(value)
                    .map_err(|e| VakansiyaError::from(InfraError::from(e)))?;
                self.verify(key, value)
            }
            None => self.remove(key),
        }
    }

    fn verify(&self, key: &str, expected: &str) -> Result<()> {
        match self.read(key)? {
            Some(stored) if stored == expected => Ok(()),
            _ => {
                warn!(service = %self.service, key, "Keychain did not retain written credential");
                Err(VakansiyaError::Storage(format!(
                    "keychain backend did not retain '{key}'; no persistent credential store is \
                     available"
                )))
            }
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(InfraError::from(e).into()),
        }
    }
}

impl Default for KeychainTokenStore {
    fn default() -> Self {
        Self::new(DEFAULT_KEYCHAIN_SERVICE, DEFAULT_KEYCHAIN_ACCOUNT)
    }
}

impl TokenStore for KeychainTokenStore {
    fn load(&self) -> Result<Option<Credentials>> {
        debug!(service = %self.service, "Loading credentials from keychain");

        let credentials =
            Credentials::new(self.read(&self.access_key())?, self.read(&self.refresh_key())?);

        if credentials.is_empty() {
            Ok(None)
        } else {
            Ok(Some(credentials))
        }
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        debug!(service = %self.service, "Saving credentials to keychain");

        self.write(&self.access_key(), credentials.access_token.as_deref())?;
        self.write(&self.refresh_key(), credentials.refresh_token.as_deref())
    }

    fn clear(&self) -> Result<()> {
        debug!(service = %self.service, "Clearing credentials from keychain");

        self.remove(&self.access_key())?;
        self.remove(&self.refresh_key())
    }
}
