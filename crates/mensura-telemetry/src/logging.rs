//! Structured logging.
//!
//! One `tracing-subscriber` format layer, JSON or pretty, behind an
//! [`EnvFilter`].
//!
//! # Example
//!
//! ```rust,ignore
//! use mensura_telemetry::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!(route = "convert", "Serving");
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// How events are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogStyle {
    /// One JSON object per line, for log shippers.
    #[default]
    Json,
    /// Multi-line text for terminals.
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Install a subscriber at all.
    pub enabled: bool,

    /// Filter directive, e.g. `info` or `mensura_server=debug,info`.
    pub filter: String,

    /// Output style.
    pub style: LogStyle,

    /// Attach source file and line to events.
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            filter: "info".to_string(),
            style: LogStyle::Json,
            source_location: false,
        }
    }
}

impl LogConfig {
    /// Pretty output at `debug` with source locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            filter: "debug".to_string(),
            style: LogStyle::Pretty,
            source_location: true,
            ..Self::default()
        }
    }
}

/// Installs the global subscriber.
///
/// Does nothing when logging is disabled. Fails on an invalid filter
/// directive or when a subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = parse_filter(&config.filter)?;
    let location = config.source_location;

    let format: Box<dyn Layer<Registry> + Send + Sync> = match config.style {
        LogStyle::Json => fmt::layer()
            .json()
            .with_file(location)
            .with_line_number(location)
            .boxed(),
        LogStyle::Pretty => fmt::layer()
            .pretty()
            .with_file(location)
            .with_line_number(location)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(format.with_filter(filter))
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Parses a filter directive.
pub fn parse_filter(directive: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| TelemetryError::InvalidConfig(format!("invalid log filter '{directive}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_logs_json_at_info() {
        let config = LogConfig::default();
        assert!(config.enabled);
        assert_eq!(config.style, LogStyle::Json);
        assert_eq!(config.filter, "info");
        assert!(!config.source_location);
    }

    #[test]
    fn test_development_config() {
        let config = LogConfig::development();
        assert_eq!(config.style, LogStyle::Pretty);
        assert_eq!(config.filter, "debug");
        assert!(config.source_location);
    }

    #[test]
    fn test_filter_directives() {
        assert!(parse_filter("info").is_ok());
        assert!(parse_filter("mensura_server=debug,warn").is_ok());

        let err = parse_filter("mensura=loud").unwrap_err();
        assert!(err.to_string().contains("mensura=loud"));
    }

    #[test]
    fn test_disabled_logging_installs_nothing() {
        let config = LogConfig {
            enabled: false,
            ..LogConfig::default()
        };
        assert!(init_logging(&config).is_ok());
    }
}
