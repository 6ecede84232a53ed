use tracing::instrument;
use vakansiya_domain::{Notification, PushTokenRegistration};

use super::{resource_path, ApiCommands};
use crate::api::errors::ApiError;

impl ApiCommands {
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self))]
    pub async fn list_notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.client.get("/notifications").await
    }

    /// # Errors
    ///
    /// Returns error if the notification does not exist or the request fails
    #[instrument(skip(self))]
    pub async fn mark_notification_read(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .patch_empty::<serde_json::Value>(&resource_path("/notifications", id, "/read"))
            .await
            .map(|_| ())
    }

    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self))]
    pub async fn mark_all_notifications_read(&self) -> Result<(), ApiError> {
        self.client.post_empty::<serde_json::Value>("/notifications/read-all").await.map(|_| ())
    }

    /// Register this device for push delivery
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self, registration), fields(platform = ?registration.platform))]
    pub async fn register_push_token(
        &self,
        registration: &PushTokenRegistration,
    ) -> Result<(), ApiError> {
        self.client
            .post::<_, serde_json::Value>("/notifications/push-token", registration)
            .await
            .map(|_| ())
    }
}
