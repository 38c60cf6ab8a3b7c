//! Telemetry error types.

use thiserror::Error;

/// Errors raised while installing logging or metrics.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The Prometheus recorder could not be installed.
    #[error("Failed to initialize metrics: {0}")]
    MetricsInit(String),

    /// The tracing subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// A telemetry setting is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
