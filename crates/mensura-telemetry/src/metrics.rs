//! Prometheus metrics.
//!
//! | Metric | Type | Labels |
//! |--------|------|--------|
//! | `mensura_requests_total` | Counter | `route`, `status` |
//! | `mensura_request_duration_seconds` | Histogram | `route` |
//! | `mensura_in_flight_requests` | Gauge | - |
//! | `mensura_conversions_total` | Counter | `outcome` |
//! | `mensura_suggestions_total` | Counter | `field`, `matched` |
//! | `mensura_guard_rejections_total` | Counter | `route` |
//!
//! Recording functions are no-ops until [`init_metrics`] installs the
//! recorder.

use crate::error::TelemetryError;
use crate::TelemetryResult;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

const REQUEST_DURATION: &str = "mensura_request_duration_seconds";

/// Metrics settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Install the recorder and serve `/metrics`.
    pub enabled: bool,

    /// Upper bounds, in seconds, of the request duration histogram.
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_buckets: vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        }
    }
}

/// Installs the global Prometheus recorder.
///
/// The exporter does not listen on its own port; the rendered text is served
/// by the application's `/metrics` route through [`render_metrics`].
/// Calling this again after a successful install is a no-op.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled || METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    if config.duration_buckets.is_empty() {
        return Err(TelemetryError::InvalidConfig(
            "duration_buckets must not be empty".to_string(),
        ));
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION.to_string()),
            &config.duration_buckets,
        )
        .map_err(|e| TelemetryError::InvalidConfig(e.to_string()))?
        .install_recorder()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    let _ = METRICS_HANDLE.set(handle);
    register_metric_descriptions();

    Ok(())
}

/// Renders every metric in the Prometheus text format.
///
/// Returns `None` when metrics were never initialized.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn register_metric_descriptions() {
    describe_counter!("mensura_requests_total", "Total number of HTTP requests processed");
    describe_histogram!(REQUEST_DURATION, "HTTP request duration in seconds");
    describe_gauge!(
        "mensura_in_flight_requests",
        "Number of HTTP requests currently being processed"
    );
    describe_counter!("mensura_conversions_total", "Conversions attempted, by outcome");
    describe_counter!("mensura_suggestions_total", "Suggestion lookups served");
    describe_counter!(
        "mensura_guard_rejections_total",
        "Requests rejected for lacking the marker header"
    );
}

/// Records a completed request.
pub fn record_request(route: &str, status_code: u16, duration: Duration) {
    counter!(
        "mensura_requests_total",
        "route" => route.to_string(),
        "status" => status_code.to_string()
    )
    .increment(1);

    histogram!(REQUEST_DURATION, "route" => route.to_string()).record(duration.as_secs_f64());
}

/// Records a conversion; `outcome` is `ok` or an error code.
pub fn record_conversion(outcome: &str) {
    counter!("mensura_conversions_total", "outcome" => outcome.to_string()).increment(1);
}

/// Records a suggestion lookup for `field` (`from_unit` or `to_unit`).
pub fn record_suggestion(field: &str, matched: bool) {
    counter!(
        "mensura_suggestions_total",
        "field" => field.to_string(),
        "matched" => matched.to_string()
    )
    .increment(1);
}

/// Records a request turned away by the access guard.
pub fn record_guard_rejection(route: &str) {
    counter!("mensura_guard_rejections_total", "route" => route.to_string()).increment(1);
}

/// Tracks one in-flight request for as long as it is alive.
#[derive(Debug)]
pub struct InFlightGuard {
    _private: (),
}

impl InFlightGuard {
    /// Increments the in-flight gauge.
    #[must_use]
    pub fn new() -> Self {
        gauge!("mensura_in_flight_requests").increment(1.0);
        Self { _private: () }
    }
}

impl Default for InFlightGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        gauge!("mensura_in_flight_requests").decrement(1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MetricsConfig::default();
        assert!(config.enabled);
        assert_eq!(config.duration_buckets.len(), 12);
    }

    #[test]
    fn test_disabled_metrics_install_nothing() {
        let config = MetricsConfig {
            enabled: false,
            duration_buckets: Vec::new(),
        };
        assert!(init_metrics(&config).is_ok());
    }

    #[test]
    fn test_record_functions_dont_panic() {
        let _guard = InFlightGuard::new();
        record_request("convert", 200, Duration::from_millis(3));
        record_conversion("ok");
        record_suggestion("from_unit", true);
        record_guard_rejection("suggestions");
    }

    #[test]
    fn test_rendered_output_contains_recorded_metrics() {
        init_metrics(&MetricsConfig::default()).unwrap();
        record_conversion("UNKNOWN_UNIT");

        let text = render_metrics().unwrap();
        assert!(text.contains("mensura_conversions_total"));
        assert!(text.contains("UNKNOWN_UNIT"));
    }
}
