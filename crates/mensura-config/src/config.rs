//! The top-level [`MensuraConfig`].

use serde::{Deserialize, Serialize};

use crate::{AssetsConfig, ConfigError, DocsConfig, GuardConfig, LogFormat, ServerConfig, TelemetrySection};

/// Complete server configuration.
///
/// # Example
///
/// ```
/// use mensura_config::MensuraConfig;
///
/// let config = MensuraConfig::default();
/// assert_eq!(config.guard.marker_header, "HX-Request");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct MensuraConfig {
    /// Listener and request limits.
    #[serde(default)]
    pub server: ServerConfig,

    /// Static assets.
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Access guard.
    #[serde(default)]
    pub guard: GuardConfig,

    /// API documentation.
    #[serde(default)]
    pub docs: DocsConfig,

    /// Logging and metrics.
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl MensuraConfig {
    /// Checks values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .server
            .http_addr
            .parse::<std::net::SocketAddr>()
            .is_err()
        {
            return Err(ConfigError::invalid_value(
                "server.http_addr",
                format!("invalid socket address: {}", self.server.http_addr),
            ));
        }

        let prefix = &self.server.mount_prefix;
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            return Err(ConfigError::invalid_value(
                "server.mount_prefix",
                "must be empty or start with '/' and not end with '/'",
            ));
        }

        if self.server.request_timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "server.request_timeout_ms",
                "must be greater than zero",
            ));
        }

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "server.max_body_bytes",
                "must be greater than zero",
            ));
        }

        if http::HeaderName::from_bytes(self.guard.marker_header.as_bytes()).is_err() {
            return Err(ConfigError::invalid_value(
                "guard.marker_header",
                format!("invalid header name: {}", self.guard.marker_header),
            ));
        }

        if let Some(entry) = self.guard.allow_list.iter().find(|e| !e.starts_with('/')) {
            return Err(ConfigError::invalid_value(
                "guard.allow_list",
                format!("entries must start with '/': {entry}"),
            ));
        }

        if let Err(e) = mensura_telemetry::logging::parse_filter(&self.telemetry.logging.level) {
            return Err(ConfigError::invalid_value(
                "telemetry.logging.level",
                e.to_string(),
            ));
        }

        if self.telemetry.metrics.enabled && self.telemetry.metrics.histogram_buckets.is_empty() {
            return Err(ConfigError::invalid_value(
                "telemetry.metrics.histogram_buckets",
                "must not be empty when metrics are enabled",
            ));
        }

        Ok(())
    }

    /// Defaults suited to local work: pretty debug logs.
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.telemetry.logging.level = "debug".to_string();
        config.telemetry.logging.format = LogFormat::Pretty;
        config.telemetry.logging.include_location = true;
        config
    }
}
