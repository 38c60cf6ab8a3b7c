//! Observability for Mensura.
//!
//! - **Logging**: `tracing` events rendered by `tracing-subscriber`, as JSON
//!   lines or pretty text.
//! - **Metrics**: the `metrics` facade backed by a Prometheus recorder whose
//!   output the server exposes at `/metrics`.
//!
//! # Example
//!
//! ```rust,ignore
//! use mensura_telemetry::{init_telemetry, TelemetryConfig};
//!
//! init_telemetry(&TelemetryConfig::default())?;
//! mensura_telemetry::metrics::record_conversion("ok");
//! ```

#![doc(html_root_url = "https://docs.rs/mensura-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig, LogStyle};
pub use metrics::{init_metrics, render_metrics, InFlightGuard, MetricsConfig};

/// Result type for telemetry setup.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Logging and metrics settings for one service.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    /// Name attached to the startup log line.
    pub service_name: String,
    /// Logging settings.
    pub logging: LogConfig,
    /// Metrics settings.
    pub metrics: MetricsConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "mensura".to_string(),
            logging: LogConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

/// Installs logging, then metrics.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&config.logging)?;
    init_metrics(&config.metrics)?;

    tracing::info!(
        service = %config.service_name,
        metrics = config.metrics.enabled,
        log_style = ?config.logging.style,
        "Telemetry initialized"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "mensura");
        assert!(config.logging.enabled);
        assert!(config.metrics.enabled);
    }

    #[test]
    fn test_disabled_telemetry_is_a_no_op() {
        let config = TelemetryConfig {
            logging: LogConfig {
                enabled: false,
                ..LogConfig::default()
            },
            metrics: MetricsConfig {
                enabled: false,
                ..MetricsConfig::default()
            },
            ..TelemetryConfig::default()
        };
        assert!(init_telemetry(&config).is_ok());
    }
}
