//! API commands for marketplace operations
//!
//! One method per backend operation, grouped by area. Each is a thin mapping
//! onto a single [`ApiClient`] call, so authentication, refresh and error
//! classification behave identically everywhere.

mod auth;
mod geo;
mod jobs;
mod notifications;
mod support;

use std::sync::Arc;

use url::form_urlencoded;
use urlencoding::encode;

use super::client::ApiClient;

/// API commands for marketplace operations
pub struct ApiCommands {
    client: Arc<ApiClient>,
}

impl ApiCommands {
    /// Create a new commands instance
    ///
    /// # Arguments
    ///
    /// * `client` - API client
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Underlying executor
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }
}

/// `{prefix}/{id}{suffix}` with `id` percent-encoded as one path segment
pub(crate) fn resource_path(prefix: &str, id: &str, suffix: &str) -> String {
    format!("{prefix}/{}{suffix}", encode(id))
}

/// Append a form-encoded query; no `?` when there are no pairs
pub(crate) fn with_query<K, V>(path: &str, pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if pairs.is_empty() {
        return path.to_string();
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())))
        .finish();
    format!("{path}?{query}")
}
