//! The HTTP/1.1 listener.
//!
//! The server owns the socket side of the application: it accepts
//! connections, collects each request body under a size limit and a
//! timeout, hands the request to [`App::handle`] and shuts down gracefully.
//!
//! ```rust,ignore
//! use mensura_server::{App, Server, ServerSettings};
//!
//! let settings = ServerSettings::from(&config.server);
//! Server::new(App::new(&config, system)?, settings).run().await?;
//! ```

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use mensura_config::ServerConfig;
use mensura_middleware::{Response, ResponseExt};
use tokio::net::{TcpListener, TcpStream};

use crate::app::App;
use crate::error::{ServerError, ServerResult};
use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Address to bind.
    pub http_addr: String,
    /// How long shutdown waits for open connections.
    pub shutdown_timeout: Duration,
    /// Budget for reading a body, and separately for handling the request.
    pub request_timeout: Duration,
    /// Largest accepted body.
    pub max_body_bytes: usize,
}

impl From<&ServerConfig> for ServerSettings {
    fn from(config: &ServerConfig) -> Self {
        Self {
            http_addr: config.http_addr.clone(),
            shutdown_timeout: Duration::from_secs(config.shutdown_timeout_secs),
            request_timeout: Duration::from_millis(config.request_timeout_ms),
            max_body_bytes: config.max_body_bytes,
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

/// Serves an [`App`] over HTTP/1.1.
#[derive(Debug)]
pub struct Server {
    app: Arc<App>,
    settings: Arc<ServerSettings>,
}

impl Server {
    /// Creates a server for `app`.
    #[must_use]
    pub fn new(app: App, settings: ServerSettings) -> Self {
        Self {
            app: Arc::new(app),
            settings: Arc::new(settings),
        }
    }

    /// The listener settings.
    #[must_use]
    pub fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// Serves until SIGINT or SIGTERM.
    pub async fn run(self) -> ServerResult<()> {
        let shutdown = ShutdownSignal::with_os_signals();
        self.run_with_shutdown(shutdown).await
    }

    /// Binds the configured address and serves until `shutdown` fires.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> ServerResult<()> {
        let addr: SocketAddr = self
            .settings
            .http_addr
            .parse()
            .map_err(|_| ServerError::InvalidAddress(self.settings.http_addr.clone()))?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::bind(addr.to_string(), e))?;

        self.serve(listener, shutdown).await
    }

    /// Serves on an already bound listener until `shutdown` fires.
    pub async fn serve(self, listener: TcpListener, shutdown: ShutdownSignal) -> ServerResult<()> {
        let local_addr = listener.local_addr()?;
        tracing::info!(addr = %local_addr, prefix = %self.app.mount_prefix(), "Server listening");

        let tracker = ConnectionTracker::new();

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, remote_addr)) => {
                            let guard = tracker.open();
                            let app = Arc::clone(&self.app);
                            let settings = Arc::clone(&self.settings);
                            let shutdown = shutdown.clone();

                            tokio::spawn(async move {
                                if let Err(e) = serve_connection(stream, app, settings, shutdown).await {
                                    tracing::debug!(remote = %remote_addr, error = %e, "Connection error");
                                }
                                drop(guard);
                            });
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to accept connection");
                        }
                    }
                }

                _ = shutdown.triggered() => {
                    tracing::info!("Shutdown signal received, no longer accepting connections");
                    break;
                }
            }
        }

        self.app.readiness().set_ready(false);

        tracing::info!(
            active = tracker.open_count(),
            timeout_secs = self.settings.shutdown_timeout.as_secs(),
            "Draining connections"
        );

        tokio::select! {
            _ = tracker.drained() => {
                tracing::info!("All connections closed");
            }
            _ = tokio::time::sleep(self.settings.shutdown_timeout) => {
                tracing::warn!(
                    active = tracker.open_count(),
                    "Shutdown timeout reached with connections still open"
                );
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn serve_connection(
    stream: TcpStream,
    app: Arc<App>,
    settings: Arc<ServerSettings>,
    shutdown: ShutdownSignal,
) -> Result<(), hyper::Error> {
    let io = TokioIo::new(stream);
    let service = service_fn(move |request: http::Request<Incoming>| {
        let app = Arc::clone(&app);
        let settings = Arc::clone(&settings);
        async move { Ok::<_, Infallible>(handle_request(&app, &settings, request).await) }
    });

    let connection = http1::Builder::new().serve_connection(io, service);
    tokio::pin!(connection);

    let mut draining = false;
    loop {
        tokio::select! {
            result = connection.as_mut() => return result,
            _ = shutdown.triggered(), if !draining => {
                // finish the in-flight exchange, then close
                draining = true;
                connection.as_mut().graceful_shutdown();
            }
        }
    }
}

async fn handle_request(
    app: &App,
    settings: &ServerSettings,
    request: http::Request<Incoming>,
) -> Response {
    let (parts, body) = request.into_parts();

    let collected = tokio::time::timeout(
        settings.request_timeout,
        Limited::new(body, settings.max_body_bytes).collect(),
    )
    .await;

    let body = match collected {
        Ok(Ok(collected)) => collected.to_bytes(),
        Ok(Err(e)) if e.downcast_ref::<LengthLimitError>().is_some() => {
            tracing::debug!(limit = settings.max_body_bytes, "Request body too large");
            return Response::json_error(
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                &format!("Request body exceeds {} bytes", settings.max_body_bytes),
            );
        }
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "Failed to read request body");
            return Response::json_error(
                StatusCode::BAD_REQUEST,
                "BODY_READ_ERROR",
                &format!("Failed to read request body: {e}"),
            );
        }
        Err(_) => {
            tracing::warn!(path = %parts.uri.path(), "Request body timed out");
            return Response::json_error(
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "Request body collection timed out",
            );
        }
    };

    let path = parts.uri.path().to_string();
    let request = http::Request::from_parts(parts, Full::new(body));

    match tokio::time::timeout(settings.request_timeout, app.handle(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(path = %path, "Handler timed out");
            Response::json_error(
                StatusCode::GATEWAY_TIMEOUT,
                "HANDLER_TIMEOUT",
                "Request handling timed out",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mensura_config::MensuraConfig;
    use mensura_units::UnitRegistry;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn app() -> App {
        let mut config = MensuraConfig::default();
        config.assets.static_dir = None;
        App::new(&config, Arc::new(UnitRegistry::new().unwrap())).unwrap()
    }

    fn settings() -> ServerSettings {
        ServerSettings {
            http_addr: "127.0.0.1:0".into(),
            shutdown_timeout: Duration::from_millis(200),
            request_timeout: Duration::from_secs(5),
            max_body_bytes: 64,
        }
    }

    async fn exchange(addr: SocketAddr, raw: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(raw.as_bytes()).await.unwrap();
        let mut buf = Vec::new();
        stream.read_to_end(&mut buf).await.unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_settings_from_config() {
        let settings = ServerSettings::default();
        assert_eq!(settings.http_addr, "127.0.0.1:8000");
        assert_eq!(settings.shutdown_timeout, Duration::from_secs(30));
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.max_body_bytes, 65_536);
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let mut settings = settings();
        settings.http_addr = "not-an-address".into();
        let err = Server::new(app(), settings)
            .run_with_shutdown(ShutdownSignal::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::InvalidAddress(_)));
    }

    #[tokio::test]
    async fn test_triggered_shutdown_stops_server() {
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            Server::new(app(), settings()).run_with_shutdown(shutdown),
        )
        .await;
        assert!(matches!(result, Ok(Ok(()))));
    }

    #[tokio::test]
    async fn test_serves_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = ShutdownSignal::new();
        let server = tokio::spawn(Server::new(app(), settings()).serve(listener, shutdown.clone()));

        let response = exchange(addr, "GET /health HTTP/1.1\r\nHost: x\r\nConnection: close\r\n\r\n").await;
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.contains("\"status\":\"healthy\""));

        let body = r#"{"quantity": 1, "from_unit": "meter", "to_unit": "centimeter"}"#;
        let raw = format!(
            "POST /json/convert HTTP/1.1\r\nHost: x\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let response = exchange(addr, &raw).await;
        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.ends_with(r#"{"result":100.0000}"#), "{response}");

        shutdown.trigger();
        let result = tokio::time::timeout(Duration::from_secs(5), server).await.unwrap();
        assert!(result.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = ShutdownSignal::new();
        tokio::spawn(Server::new(app(), settings()).serve(listener, shutdown.clone()));

        let body = "x".repeat(128);
        let raw = format!(
            "POST /json/convert HTTP/1.1\r\nHost: x\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let response = exchange(addr, &raw).await;
        assert!(response.starts_with("HTTP/1.1 413"), "{response}");
        assert!(response.contains("PAYLOAD_TOO_LARGE"));

        shutdown.trigger();
    }
}
