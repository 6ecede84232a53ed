//! Application context - dependency injection container

use std::sync::Arc;

use tracing::info;
use vakansiya_core::{SessionStore, TokenRotationListener, TokenStore};
use vakansiya_domain::{Config, Result, VakansiyaError};
use vakansiya_infra::{
    ApiClient, ApiClientConfig, ApiCommands, KeychainTokenStore, PersistingRotationListener,
    SessionManager,
};

/// Application context - holds all services and dependencies
pub struct AppContext {
    /// Loaded configuration
    pub config: Config,
    /// Shared in-memory session
    pub session: Arc<SessionStore>,
    /// Persistent token storage
    pub token_store: Arc<dyn TokenStore>,
    /// Request executor
    pub client: Arc<ApiClient>,
    /// Typed backend operations
    pub commands: Arc<ApiCommands>,
    /// Sign-in lifecycle
    pub sessions: Arc<SessionManager>,
}

impl AppContext {
    /// Build the context with the platform keychain as token storage
    ///
    /// # Errors
    /// Returns `VakansiyaError::Config` if the API client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let store = Arc::new(KeychainTokenStore::from_config(&config.session));
        Self::with_token_store(config, store)
    }

    /// Build the context around an explicit token store
    ///
    /// Rotated tokens are written to `token_store` through the session's
    /// rotation listener.
    ///
    /// # Errors
    /// Returns `VakansiyaError::Config` if the API client cannot be built.
    pub fn with_token_store(config: Config, token_store: Arc<dyn TokenStore>) -> Result<Self> {
        let session = Arc::new(SessionStore::new());
        let listener: Arc<dyn TokenRotationListener> =
            Arc::new(PersistingRotationListener::new(token_store.clone()));

        let client = ApiClient::builder()
            .config(ApiClientConfig::from_config(&config.api))
            .session(session.clone())
            .rotation_listener(listener)
            .build()
            .map_err(VakansiyaError::from)?;
        let client = Arc::new(client);

        let commands = Arc::new(ApiCommands::new(client.clone()));
        let sessions =
            Arc::new(SessionManager::new(commands.clone(), session.clone(), token_store.clone()));

        info!(base_url = %client.base_url(), "Application context ready");

        Ok(Self { config, session, token_store, client, commands, sessions })
    }

    /// Restore the persisted session; see [`SessionManager::restore`]
    pub fn restore_session(&self) -> bool {
        self.sessions.restore()
    }
}
