//! Account operations: login, registration, password and profile

use tracing::{debug, instrument};
use vakansiya_domain::{
    AuthResponse, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, MessageResponse,
    ProfileUpdate, RegisterRequest, UserProfile,
};

use super::ApiCommands;
use crate::api::errors::ApiError;

impl ApiCommands {
    /// Exchange email and password for a token pair
    ///
    /// The returned tokens are not applied to the session here; see
    /// `SessionManager::sign_in` for the flow that stores them.
    ///
    /// # Errors
    ///
    /// Returns error if the credentials are rejected or the request fails
    #[instrument(skip(self, request))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        debug!("Logging in");
        self.client.post("/auth/login", request).await
    }

    /// Create an account
    ///
    /// # Errors
    ///
    /// Returns error if registration is rejected or the request fails
    #[instrument(skip(self, request), fields(role = ?request.role))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        debug!("Registering account");
        self.client.post("/auth/register", request).await
    }

    /// Invalidate the session server-side
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.post_empty::<serde_json::Value>("/auth/logout").await.map(|_| ())
    }

    /// Profile of the signed-in user
    ///
    /// # Errors
    ///
    /// Returns error if not signed in or the request fails
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<UserProfile, ApiError> {
        self.client.get("/auth/me").await
    }

    /// Ask the backend to email a password reset link
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self, email))]
    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ApiError> {
        let request = ForgotPasswordRequest { email: email.to_string() };
        self.client.post("/auth/forgot-password", &request).await
    }

    /// # Errors
    ///
    /// Returns error if the current password is rejected or the request fails
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.client.post("/auth/change-password", request).await
    }

    /// Update fields of the signed-in user's profile
    ///
    /// # Errors
    ///
    /// Returns error if the update is rejected or the request fails
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.client.patch("/users/me", update).await
    }
}
