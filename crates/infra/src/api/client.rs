//! Authenticated API client
//!
//! Sends one request per call, attaching the bearer token held by the shared
//! [`SessionStore`]. A 401 on the first attempt, while a refresh token is
//! held, triggers one token refresh and one re-issue of the identical
//! request. Everything else is classified and returned as-is.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use vakansiya_core::{SessionStore, TokenRotationListener};
use vakansiya_domain::constants::{DEFAULT_API_BASE_URL, DEFAULT_USER_AGENT};
use vakansiya_domain::{normalize_base_url, ApiConfig, VakansiyaError};

use super::errors::ApiError;
use super::refresh::RefreshCoordinator;
use super::request::{parse_envelope, RequestDescriptor};
use crate::http::HttpClient;

const JSON: &str = "application/json";

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for API (e.g., "https://api.vakansiya.az"), no trailing slash
    pub base_url: String,
    /// Per-request timeout; `None` leaves timing to the transport
    pub timeout: Option<Duration>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ApiClientConfig {
    /// Client settings from the loaded application config
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout_secs.map(Duration::from_secs),
            user_agent: config.user_agent.clone().unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        }
    }

    /// Shorthand for a default config pointing at `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }
}

/// Status and parsed body of one round trip
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// API client bound to a session
pub struct ApiClient {
    http_client: HttpClient,
    config: ApiClientConfig,
    session: Arc<SessionStore>,
    refresher: RefreshCoordinator,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// Trailing slashes are stripped from the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is empty or the HTTP client cannot be
    /// built
    pub fn new(mut config: ApiClientConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        config.base_url = normalize_base_url(&config.base_url)
            .map_err(|e| ApiError::Config(e.message().to_string()))?;

        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {}", e)))?;

        let refresher =
            RefreshCoordinator::new(http_client.clone(), config.base_url.clone(), session.clone());

        Ok(Self { http_client, config, session, refresher })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Normalized base URL every path is joined to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The session this client reads tokens from
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Coordinator used for refresh-on-401
    pub fn refresher(&self) -> &RefreshCoordinator {
        &self.refresher
    }

    /// Execute a request, refreshing the session once on 401
    ///
    /// # Returns
    ///
    /// The response envelope: parsed JSON, the raw text when the body is not
    /// JSON, or `null` for an empty body
    ///
    /// # Errors
    ///
    /// - `ApiError::Network` if no response was received
    /// - `ApiError::Api` for any non-2xx status left after refresh handling
    #[instrument(skip(self, descriptor), fields(method = %descriptor.method(), path = %descriptor.path()))]
    pub async fn execute(&self, descriptor: RequestDescriptor) -> Result<Value, ApiError> {
        let mut descriptor = descriptor;

        loop {
            let sent_with = self.session.credentials();
            let response = self.dispatch(&descriptor, sent_with.access_token.as_deref()).await?;

            if response.status == StatusCode::UNAUTHORIZED
                && !descriptor.is_retry()
                && self.session.refresh_token().is_some()
            {
                match self.refresher.refresh(&sent_with).await {
                    Ok(_) => {
                        debug!("Session refreshed, re-issuing request");
                        descriptor = descriptor.into_retry();
                        continue;
                    }
                    Err(err) => {
                        warn!(error = %err, "Token refresh failed, returning original response");
                    }
                }
            }

            return Self::classify(response);
        }
    }

    /// Execute a request and decode the envelope into `T`
    ///
    /// # Errors
    ///
    /// As [`ApiClient::execute`], plus `ApiError::Serialization` if the body
    /// does not match `T`
    pub async fn send<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> Result<T, ApiError> {
        let value = self.execute(descriptor).await?;
        decode(value)
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(RequestDescriptor::get(path)).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(RequestDescriptor::post(path).with_body(encode(body)?)).await
    }

    /// Execute a POST request without a body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(RequestDescriptor::post(path)).await
    }

    /// Execute a PATCH request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(RequestDescriptor::patch(path).with_body(encode(body)?)).await
    }

    /// Execute a PATCH request without a body
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(RequestDescriptor::patch(path)).await
    }

    /// Execute a DELETE request
    ///
    /// # Errors
    ///
    /// Returns error if request fails or response cannot be deserialized
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(RequestDescriptor::delete(path)).await
    }

    async fn dispatch(
        &self,
        descriptor: &RequestDescriptor,
        access_token: Option<&str>,
    ) -> Result<RawResponse, ApiError> {
        let url = descriptor.url(&self.config.base_url);
        debug!(url = %url, attempt = ?descriptor.attempt(), "API request");

        round_trip(
            &self.http_client,
            descriptor.method().clone(),
            &url,
            descriptor.body(),
            access_token,
        )
        .await
    }

    fn classify(response: RawResponse) -> Result<Value, ApiError> {
        if response.status.is_success() {
            Ok(response.body)
        } else {
            Err(ApiError::from_response(response.status, response.body))
        }
    }
}

/// One network round trip with the standard JSON headers
///
/// `Content-Type` is only sent with a body and `Authorization` only with a
/// token.
pub(crate) async fn round_trip(
    http_client: &HttpClient,
    method: reqwest::Method,
    url: &str,
    body: Option<&Value>,
    bearer: Option<&str>,
) -> Result<RawResponse, ApiError> {
    let mut request = http_client.request(method, url).header(ACCEPT, JSON);

    if let Some(token) = bearer {
        request = request.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    if let Some(body) = body {
        request = request.header(CONTENT_TYPE, JSON).body(body.to_string());
    }

    let response = http_client.send(request).await.map_err(|err| match err {
        VakansiyaError::Config(message) => ApiError::Config(format!("{message} (url: {url})")),
        other => ApiError::network(other.message(), url),
    })?;

    let status = response.status();
    let text = response.text().await.map_err(|err| ApiError::network(err, url))?;

    Ok(RawResponse { status, body: parse_envelope(&text) })
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::Serialization(format!("Failed to serialize body: {}", e)))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::Serialization(format!("Failed to parse response: {}", e)))
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    session: Option<Arc<SessionStore>>,
    rotation_listener: Option<Arc<dyn TokenRotationListener>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Share an existing session; a fresh empty one is created otherwise
    pub fn session(mut self, session: Arc<SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    /// Listener registered on the session at build time
    pub fn rotation_listener(mut self, listener: Arc<dyn TokenRotationListener>) -> Self {
        self.rotation_listener = Some(listener);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let session = self.session.unwrap_or_default();

        if let Some(listener) = self.rotation_listener {
            session.set_rotation_listener(Some(listener));
        }

        ApiClient::new(config, session)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::builder()
            .config(ApiClientConfig::with_base_url(server.uri()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_builder_defaults() {
        let client = ApiClient::builder().build().unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_BASE_URL);
        assert!(client.session().credentials().is_empty());
    }

    #[tokio::test]
    async fn test_builder_registers_rotation_listener() {
        let session = Arc::new(SessionStore::new());
        let _client = ApiClient::builder()
            .session(session.clone())
            .rotation_listener(Arc::new(|_: &vakansiya_domain::TokenRotation| {}))
            .build()
            .unwrap();
        assert!(session.has_rotation_listener());
    }

    #[tokio::test]
    async fn test_trailing_slash_stripped() {
        let client = ApiClient::builder()
            .config(ApiClientConfig::with_base_url("https://api.example.com//"))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[tokio::test]
    async fn test_empty_base_url_rejected() {
        let result = ApiClient::builder().config(ApiClientConfig::with_base_url("/")).build();
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[tokio::test]
    async fn test_get_with_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test"))
            .and(header("Accept", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(TestResponse { message: "success".to_string() }),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result: TestResponse = client.get("/test").await.unwrap();
        assert_eq!(result.message, "success");
    }

    #[tokio::test]
    async fn test_path_without_leading_slash() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/jobs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result: Vec<Value> = client.get("jobs").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/create"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({ "data": "test" })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(TestResponse { message: "created".to_string() }),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result: TestResponse =
            client.post("/create", &json!({ "data": "test" })).await.unwrap();
        assert_eq!(result.message, "created");
    }

    #[tokio::test]
    async fn test_empty_body_decodes_to_unit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/jobs/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result: Result<(), ApiError> = client.delete("/jobs/1").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_text_body_returned_raw() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/plain"))
            .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let value = client.execute(RequestDescriptor::get("/plain")).await.unwrap();
        assert_eq!(value, json!("pong"));
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_serialization_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "other": 1 })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result: Result<TestResponse, ApiError> = client.get("/test").await;
        assert!(matches!(result, Err(ApiError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_get_with_500_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/error"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal server error"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let err = client.get::<TestResponse>("/error").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP 500");
        match err {
            ApiError::Api { body, .. } => assert_eq!(body, json!("Internal server error")),
            other => panic!("expected api error, got {other:?}"),
        }
    }
}
