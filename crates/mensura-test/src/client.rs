//! In-memory client for a Mensura application.

use std::sync::Arc;

use bytes::Bytes;
use http::Method;
use mensura_config::MensuraConfig;
use mensura_server::App;
use mensura_units::UnitRegistry;
use serde::Serialize;

use crate::error::TestError;
use crate::request::{TestRequest, TestRequestBuilder};
use crate::response::TestResponse;

/// Sends requests straight into [`App::handle`].
///
/// ```
/// use mensura_config::MensuraConfig;
/// use mensura_test::TestClient;
///
/// let mut config = MensuraConfig::default();
/// config.server.mount_prefix = "/hx".into();
/// let client = TestClient::with_config(&config).unwrap();
/// assert_eq!(client.app().mount_prefix(), "/hx");
/// ```
#[must_use]
pub struct TestClient {
    app: Arc<App>,
    default_headers: Vec<(String, String)>,
}

impl TestClient {
    /// Wraps an assembled application.
    pub fn new(app: App) -> Self {
        Self {
            app: Arc::new(app),
            default_headers: Vec::new(),
        }
    }

    /// Builds the application from `config` and the built-in unit registry.
    pub fn with_config(config: &MensuraConfig) -> Result<Self, TestError> {
        let registry = UnitRegistry::new().map_err(|e| TestError::App(e.to_string()))?;
        let app = App::new(config, Arc::new(registry)).map_err(|e| TestError::App(e.to_string()))?;
        Ok(Self::new(app))
    }

    /// Default configuration without static assets.
    pub fn with_defaults() -> Result<Self, TestError> {
        let mut config = MensuraConfig::default();
        config.assets.static_dir = None;
        Self::with_config(&config)
    }

    /// Adds a header sent with every request.
    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// The application under test.
    #[must_use]
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Starts a GET request.
    pub fn get(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::get(uri))
    }

    /// Starts a POST request.
    pub fn post(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::post(uri))
    }

    /// Starts a HEAD request.
    pub fn head(&self, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequest::head(uri))
    }

    /// Starts a request with any method.
    pub fn request(&self, method: Method, uri: impl AsRef<str>) -> TestClientRequest<'_> {
        TestClientRequest::new(self, TestRequestBuilder::new(method, uri))
    }

    async fn dispatch(&self, request: TestRequest) -> Result<TestResponse, TestError> {
        let response = self.app.handle(request.into_http_request()?).await;
        TestResponse::from_http(response).await
    }
}

impl std::fmt::Debug for TestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestClient")
            .field("mount_prefix", &self.app.mount_prefix())
            .field("default_headers", &self.default_headers)
            .finish()
    }
}

/// A request bound to a [`TestClient`].
#[must_use]
pub struct TestClientRequest<'a> {
    client: &'a TestClient,
    builder: TestRequestBuilder,
}

impl<'a> TestClientRequest<'a> {
    fn new(client: &'a TestClient, builder: TestRequestBuilder) -> Self {
        let builder = client
            .default_headers
            .iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value));
        Self { client, builder }
    }

    /// Sets a header.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    /// Adds the marker header.
    pub fn marker(mut self) -> Self {
        self.builder = self.builder.marker();
        self
    }

    /// Sets the raw body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.builder = self.builder.body(body);
        self
    }

    /// Sets a JSON body.
    pub fn json<T: Serialize>(mut self, value: &T) -> Self {
        self.builder = self.builder.json(value);
        self
    }

    /// Sets a form body.
    pub fn form<T: Serialize>(mut self, value: &T) -> Self {
        self.builder = self.builder.form(value);
        self
    }

    /// Sends the request.
    ///
    /// # Panics
    ///
    /// Panics when the request cannot be built or the body cannot be read;
    /// use [`try_send`](Self::try_send) to handle those.
    pub async fn send(self) -> TestResponse {
        match self.try_send().await {
            Ok(response) => response,
            Err(e) => panic!("test request failed: {e}"),
        }
    }

    /// Sends the request, returning build and read errors.
    pub async fn try_send(self) -> Result<TestResponse, TestError> {
        let request = self.builder.build()?;
        self.client.dispatch(request).await
    }
}
