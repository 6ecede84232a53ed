//! Sign-in lifecycle on top of the session store
//!
//! The session store only holds tokens in memory. `SessionManager` ties it to
//! durable storage: it restores the pair at startup, stores the pair returned
//! by login or registration, and wipes both places on sign-out. Refreshed
//! pairs reach storage through [`super::PersistingRotationListener`].

use std::sync::Arc;

use tracing::{info, instrument, warn};
use vakansiya_core::{SessionStore, TokenStore};
use vakansiya_domain::{AuthResponse, Credentials, LoginRequest, RegisterRequest};

use crate::api::{ApiCommands, ApiError};

/// Sign-in lifecycle over the facade, the session and a token store
pub struct SessionManager {
    commands: Arc<ApiCommands>,
    session: Arc<SessionStore>,
    store: Arc<dyn TokenStore>,
}

impl SessionManager {
    /// Manager over shared facade, session and store
    pub fn new(
        commands: Arc<ApiCommands>,
        session: Arc<SessionStore>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        Self { commands, session, store }
    }

    /// Session this manager updates
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Load persisted credentials into the session store
    ///
    /// Returns whether an access token was restored. Unreadable storage is
    /// logged and treated as signed out.
    #[instrument(skip(self))]
    pub fn restore(&self) -> bool {
        match self.store.load() {
            Ok(Some(credentials)) => {
                self.session.set_credentials(credentials);
                let restored = self.session.is_authenticated();
                info!(restored, "Session restored from storage");
                restored
            }
            Ok(None) => {
                info!("No stored session");
                false
            }
            Err(e) => {
                warn!(error = %e, "Failed to load stored session");
                false
            }
        }
    }

    /// Log in and keep the returned pair
    ///
    /// # Errors
    ///
    /// Returns error if login fails, or `ApiError::Auth` if the response
    /// carried no access token
    #[instrument(skip(self, request))]
    pub async fn sign_in(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let response = self.commands.login(request).await?;
        self.adopt(&response)?;
        info!("Signed in");
        Ok(response)
    }

    /// Register and keep the returned pair
    ///
    /// # Errors
    ///
    /// Returns error if registration fails, or `ApiError::Auth` if the
    /// response carried no access token
    #[instrument(skip(self, request))]
    pub async fn sign_up(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let response = self.commands.register(request).await?;
        self.adopt(&response)?;
        info!("Signed up");
        Ok(response)
    }

    /// End the session locally and, best-effort, on the server
    ///
    /// The server call is skipped when no access token is held. Its failure
    /// never prevents the local wipe.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) {
        if self.session.is_authenticated() {
            if let Err(e) = self.commands.logout().await {
                warn!(error = %e, "Server-side logout failed");
            }
        }

        self.session.clear();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }
        info!("Signed out");
    }

    fn adopt(&self, response: &AuthResponse) -> Result<(), ApiError> {
        let credentials: Credentials = response.credentials();
        if credentials.access_token.is_none() {
            return Err(ApiError::Auth("Response carried no access token".into()));
        }

        self.session.set_credentials(credentials.clone());
        if let Err(e) = self.store.save(&credentials) {
            warn!(error = %e, "Failed to persist credentials");
        }
        Ok(())
    }
}
