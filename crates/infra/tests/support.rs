#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use vakansiya_core::{SessionStore, TokenRotationListener};
use vakansiya_domain::{Credentials, TokenRotation};
use vakansiya_infra::{ApiClient, ApiClientConfig, ApiCommands};
use wiremock::{MockServer, Request};

/// Rotation listener that remembers every call
#[derive(Default)]
pub struct RecordingListener {
    calls: Mutex<Vec<TokenRotation>>,
}

impl RecordingListener {
    pub fn calls(&self) -> Vec<TokenRotation> {
        self.calls.lock().clone()
    }
}

impl TokenRotationListener for RecordingListener {
    fn on_tokens_rotated(&self, rotation: &TokenRotation) {
        self.calls.lock().push(rotation.clone());
    }
}

/// Client wired to a mock server, plus handles for assertions
pub struct TestClient {
    pub client: Arc<ApiClient>,
    pub session: Arc<SessionStore>,
    pub rotations: Arc<RecordingListener>,
}

impl TestClient {
    pub fn commands(&self) -> ApiCommands {
        ApiCommands::new(self.client.clone())
    }
}

pub fn tokens(access: Option<&str>, refresh: Option<&str>) -> Credentials {
    Credentials::new(access.map(str::to_string), refresh.map(str::to_string))
}

pub fn test_client(server: &MockServer, credentials: Credentials) -> TestClient {
    build(ApiClientConfig::with_base_url(server.uri()), credentials)
}

pub fn test_client_with_timeout(
    server: &MockServer,
    credentials: Credentials,
    timeout: Duration,
) -> TestClient {
    let config =
        ApiClientConfig { timeout: Some(timeout), ..ApiClientConfig::with_base_url(server.uri()) };
    build(config, credentials)
}

fn build(config: ApiClientConfig, credentials: Credentials) -> TestClient {
    let session = Arc::new(SessionStore::with_credentials(credentials));
    let rotations = Arc::new(RecordingListener::default());

    let client = ApiClient::builder()
        .config(config)
        .session(session.clone())
        .rotation_listener(rotations.clone())
        .build()
        .expect("client should build");

    TestClient { client: Arc::new(client), session, rotations }
}

/// Requests the server received for `path`, in arrival order
pub async fn requests_to(server: &MockServer, path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
        .into_iter()
        .filter(|request| request.url.path() == path)
        .collect()
}

pub fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|value| value.to_str().ok())
}
