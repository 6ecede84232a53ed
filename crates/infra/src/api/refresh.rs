//! Token refresh coordination
//!
//! Exchanges the held refresh token for a new pair at `POST /auth/refresh`.
//!
//! Refreshes are single-flight: concurrent callers queue on an async guard,
//! and a caller that gets the guard after the session already moved past the
//! credentials its request was sent with reuses the current pair instead of
//! spending the (possibly already rotated) refresh token again.

use std::sync::Arc;

use reqwest::Method;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use vakansiya_core::SessionStore;
use vakansiya_domain::constants::REFRESH_ENDPOINT_PATH;
use vakansiya_domain::{Credentials, TokenRotation};

use super::client::round_trip;
use super::errors::{server_error_message, ApiError};
use crate::http::HttpClient;

/// Performs refresh exchanges against the session it shares with the client
pub struct RefreshCoordinator {
    http_client: HttpClient,
    endpoint: String,
    session: Arc<SessionStore>,
    in_flight: Mutex<()>,
}

impl RefreshCoordinator {
    /// Coordinator posting to `{base_url}/auth/refresh`
    pub fn new(http_client: HttpClient, base_url: String, session: Arc<SessionStore>) -> Self {
        Self {
            http_client,
            endpoint: format!("{base_url}{REFRESH_ENDPOINT_PATH}"),
            session,
            in_flight: Mutex::new(()),
        }
    }

    /// Absolute URL of the refresh endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Exchange the current refresh token unconditionally
    ///
    /// # Errors
    ///
    /// See [`RefreshCoordinator::refresh`]
    pub async fn refresh_now(&self) -> Result<TokenRotation, ApiError> {
        let observed = self.session.credentials();
        self.refresh(&observed).await
    }

    /// Refresh after a request sent with `observed` was rejected
    ///
    /// On success the session holds the new pair and the rotation listener
    /// has been called. If another task rotated the session while this one
    /// waited, the current pair is returned without a second exchange and
    /// without a second listener call (`user` is then `None`).
    ///
    /// # Errors
    ///
    /// - `ApiError::Auth` if no refresh token is held (no request is made) or
    ///   the endpoint answers non-2xx
    /// - `ApiError::Network` if the endpoint could not be reached
    #[instrument(skip_all)]
    pub async fn refresh(&self, observed: &Credentials) -> Result<TokenRotation, ApiError> {
        let _guard = self.in_flight.lock().await;

        let current = self.session.credentials();
        if current != *observed && current.access_token.is_some() {
            debug!("Session already rotated by a concurrent refresh");
            return Ok(TokenRotation::new(current, None));
        }

        let refresh_token =
            current.refresh_token.clone().ok_or_else(|| ApiError::Auth("No refresh token".into()))?;

        let body = json!({ "refreshToken": refresh_token });
        let response =
            round_trip(&self.http_client, Method::POST, &self.endpoint, Some(&body), None).await?;

        if !response.status.is_success() {
            let message = server_error_message(&response.body).unwrap_or_else(|| {
                format!("Token refresh failed (HTTP {})", response.status.as_u16())
            });
            return Err(ApiError::Auth(message));
        }

        let rotation = rotation_from_response(&response.body, &current);
        self.session.apply_rotation(&rotation);

        info!(user_included = rotation.user.is_some(), "Session tokens rotated");
        Ok(rotation)
    }
}

/// Absent or non-string token fields keep the previous value
fn rotation_from_response(body: &Value, previous: &Credentials) -> TokenRotation {
    let field = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_string);

    let credentials = Credentials::new(
        field("token").or_else(|| previous.access_token.clone()),
        field("refreshToken").or_else(|| previous.refresh_token.clone()),
    );
    let user = body.get("user").filter(|user| !user.is_null()).cloned();

    TokenRotation::new(credentials, user)
}
