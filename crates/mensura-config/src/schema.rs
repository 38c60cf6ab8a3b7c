//! Configuration section types.

use serde::{Deserialize, Serialize};

/// HTTP listener and request handling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:8000`.
    #[serde(default = "default_http_addr")]
    pub http_addr: String,

    /// Path prefix every route is served under; empty for none.
    #[serde(default)]
    pub mount_prefix: String,

    /// How long shutdown waits for open connections.
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,

    /// Budget for reading the body and, separately, for handling the request.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Largest accepted request body.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Reuse a well-formed incoming `x-request-id` instead of minting one.
    #[serde(default)]
    pub trust_request_id: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: default_http_addr(),
            mount_prefix: String::new(),
            shutdown_timeout_secs: default_shutdown_timeout(),
            request_timeout_ms: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
            trust_request_id: false,
        }
    }
}

fn default_http_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    30_000
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

/// Static assets served under `/static`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    /// Directory holding the assets; `None` disables `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: Option<String>,

    /// `Cache-Control` header sent with every asset.
    #[serde(default = "default_cache_control")]
    pub cache_control: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
            cache_control: default_cache_control(),
        }
    }
}

#[allow(clippy::unnecessary_wraps)]
fn default_static_dir() -> Option<String> {
    Some("static".to_string())
}

fn default_cache_control() -> String {
    "public, max-age=3600".to_string()
}

/// The marker-header access guard on fragment routes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    /// Header whose presence admits a fragment request.
    #[serde(default = "default_marker_header")]
    pub marker_header: String,

    /// Paths, relative to the mount prefix, admitted without the header.
    #[serde(default = "default_allow_list")]
    pub allow_list: Vec<String>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            marker_header: default_marker_header(),
            allow_list: default_allow_list(),
        }
    }
}

fn default_marker_header() -> String {
    "HX-Request".to_string()
}

fn default_allow_list() -> Vec<String> {
    vec![
        "/docs".to_string(),
        "/redoc".to_string(),
        "/openapi.json".to_string(),
    ]
}

/// Interactive API documentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    /// Serve `/docs`, `/redoc` and `/openapi.json`.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Title shown in the documentation pages.
    #[serde(default = "default_docs_title")]
    pub title: String,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: default_docs_title(),
        }
    }
}

fn default_docs_title() -> String {
    "Mensura".to_string()
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Install a subscriber at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in events.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Metrics settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    /// Record metrics and serve `/metrics`.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Request duration histogram bounds, in seconds.
    #[serde(default = "default_histogram_buckets")]
    pub histogram_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            histogram_buckets: default_histogram_buckets(),
        }
    }
}

fn default_histogram_buckets() -> Vec<f64> {
    mensura_telemetry::MetricsConfig::default().duration_buckets
}

/// Logging and metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TelemetrySection {
    /// Service name used in logs.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics settings.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            logging: LoggingConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl TelemetrySection {
    /// Settings for [`mensura_telemetry::init_telemetry`].
    #[must_use]
    pub fn to_telemetry_config(&self) -> mensura_telemetry::TelemetryConfig {
        mensura_telemetry::TelemetryConfig {
            service_name: self.service_name.clone(),
            logging: mensura_telemetry::LogConfig {
                enabled: self.logging.enabled,
                filter: self.logging.level.clone(),
                style: match self.logging.format {
                    LogFormat::Json => mensura_telemetry::LogStyle::Json,
                    LogFormat::Pretty => mensura_telemetry::LogStyle::Pretty,
                },
                source_location: self.logging.include_location,
            },
            metrics: mensura_telemetry::MetricsConfig {
                enabled: self.metrics.enabled,
                duration_buckets: self.metrics.histogram_buckets.clone(),
            },
        }
    }
}

fn default_service_name() -> String {
    "mensura".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.http_addr, "127.0.0.1:8000");
        assert_eq!(config.mount_prefix, "");
        assert_eq!(config.shutdown_timeout_secs, 30);
        assert_eq!(config.request_timeout_ms, 30_000);
        assert_eq!(config.max_body_bytes, 65_536);
        assert!(!config.trust_request_id);
    }

    #[test]
    fn test_guard_config_default() {
        let config = GuardConfig::default();
        assert_eq!(config.marker_header, "HX-Request");
        assert_eq!(config.allow_list, vec!["/docs", "/redoc", "/openapi.json"]);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: ServerConfig = toml::from_str(r#"mount_prefix = "/hx""#).unwrap();
        assert_eq!(config.mount_prefix, "/hx");
        assert_eq!(config.http_addr, "127.0.0.1:8000");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<GuardConfig, _> = toml::from_str(r#"marker = "X-Test""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_format_serde() {
        let config: LoggingConfig = toml::from_str(r#"format = "pretty""#).unwrap();
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(toml::from_str::<LoggingConfig>(r#"format = "xml""#).is_err());
    }

    #[test]
    fn test_telemetry_conversion() {
        let mut section = TelemetrySection::default();
        section.logging.format = LogFormat::Pretty;
        section.logging.include_location = true;
        section.metrics.enabled = false;

        let config = section.to_telemetry_config();
        assert_eq!(config.service_name, "mensura");
        assert_eq!(config.logging.style, mensura_telemetry::LogStyle::Pretty);
        assert!(config.logging.source_location);
        assert!(!config.metrics.enabled);
        assert_eq!(config.metrics.duration_buckets.len(), 12);
    }
}
