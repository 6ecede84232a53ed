use tracing::instrument;
use vakansiya_domain::{GeoPoint, GeocodeResult};

use super::{with_query, ApiCommands};
use crate::api::errors::ApiError;

impl ApiCommands {
    /// Resolve a free-form address to coordinates
    ///
    /// # Errors
    ///
    /// Returns error if the address cannot be resolved or the request fails
    #[instrument(skip(self))]
    pub async fn geocode(&self, address: &str) -> Result<GeocodeResult, ApiError> {
        self.client.get(&with_query("/geocode", &[("address", address)])).await
    }

    /// Resolve coordinates to an address
    ///
    /// # Errors
    ///
    /// Returns error if the request fails
    #[instrument(skip(self))]
    pub async fn reverse_geocode(&self, point: GeoPoint) -> Result<GeocodeResult, ApiError> {
        let pairs = [("lat", point.lat.to_string()), ("lng", point.lng.to_string())];
        self.client.get(&with_query("/geocode/reverse", &pairs)).await
    }
}
