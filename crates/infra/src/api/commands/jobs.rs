use tracing::{debug, instrument};
use vakansiya_domain::{Job, JobPage, JobQuery, JobUpdate, NearbyQuery, NewJob};

use super::{resource_path, with_query, ApiCommands};
use crate::api::errors::ApiError;

impl ApiCommands {
    /// Search the job board
    ///
    /// Unset filters are left out of the query string.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self, query))]
    pub async fn list_jobs(&self, query: &JobQuery) -> Result<JobPage, ApiError> {
        let path = with_query("/jobs", &query.to_pairs());
        debug!(path = %path, "Listing jobs");
        self.client.get(&path).await
    }

    /// Jobs around a point
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self, query), fields(lat = query.center.lat, lng = query.center.lng))]
    pub async fn nearby_jobs(&self, query: &NearbyQuery) -> Result<Vec<Job>, ApiError> {
        let path = with_query("/jobs/nearby", &query.to_pairs());
        self.client.get(&path).await
    }

    /// Jobs posted by the signed-in employer
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self))]
    pub async fn my_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.client.get("/jobs/mine").await
    }

    /// # Errors
    ///
    /// Returns error if the job does not exist or the request fails
    #[instrument(skip(self))]
    pub async fn get_job(&self, id: &str) -> Result<Job, ApiError> {
        self.client.get(&resource_path("/jobs", id, "")).await
    }

    /// Publish a job posting
    ///
    /// # Returns
    ///
    /// The created job as stored by the backend
    ///
    /// # Errors
    ///
    /// Returns error if the posting is rejected or the request fails
    #[instrument(skip(self, job), fields(title = %job.title))]
    pub async fn create_job(&self, job: &NewJob) -> Result<Job, ApiError> {
        debug!("Creating job");
        self.client.post("/jobs", job).await
    }

    /// # Errors
    ///
    /// Returns error if the update is rejected or the request fails
    #[instrument(skip(self, update))]
    pub async fn update_job(&self, id: &str, update: &JobUpdate) -> Result<Job, ApiError> {
        self.client.patch(&resource_path("/jobs", id, ""), update).await
    }

    /// # Errors
    ///
    /// Returns error if the job does not exist or the request fails
    #[instrument(skip(self))]
    pub async fn delete_job(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete::<serde_json::Value>(&resource_path("/jobs", id, ""))
            .await
            .map(|_| ())
    }
}
