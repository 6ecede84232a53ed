use tracing::instrument;
use vakansiya_domain::{NewSupportTicket, SupportTicket};

use super::ApiCommands;
use crate::api::errors::ApiError;

impl ApiCommands {
    /// # Errors
    ///
    /// Returns error if the ticket is rejected or the request fails
    #[instrument(skip(self, ticket), fields(subject = %ticket.subject))]
    pub async fn create_support_ticket(
        &self,
        ticket: &NewSupportTicket,
    ) -> Result<SupportTicket, ApiError> {
        self.client.post("/support/tickets", ticket).await
    }

    /// Tickets opened by the signed-in user
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self))]
    pub async fn list_support_tickets(&self) -> Result<Vec<SupportTicket>, ApiError> {
        self.client.get("/support/tickets").await
    }
}
