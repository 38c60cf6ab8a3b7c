//! Request logging and metrics.
//!
//! Emits one `info` event per completed request and records
//! `mensura_requests_total` and `mensura_request_duration_seconds`.

use crate::context::MiddlewareContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{Request, Response};
use mensura_telemetry::metrics::{record_request, InFlightGuard};
use std::time::Instant;

/// What was observed about one request, kept in the context for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    /// Service name.
    pub service_name: String,
    /// Matched route, or `unmatched`.
    pub route: String,
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Response status.
    pub status_code: u16,
    /// Time spent in the inner stages and the handler.
    pub duration_ms: f64,
    /// Request id.
    pub request_id: String,
}

/// Logs and counts every request passing through it.
#[derive(Debug, Clone)]
pub struct TelemetryMiddleware {
    service_name: String,
}

impl TelemetryMiddleware {
    /// Creates the stage for `service_name`.
    #[must_use]
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }
}

impl Middleware for TelemetryMiddleware {
    fn name(&self) -> &'static str {
        "telemetry"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut MiddlewareContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            let _in_flight = InFlightGuard::new();
            let start = Instant::now();
            let method = request.method().to_string();
            let path = request.uri().path().to_string();

            let response = next.run(ctx, request).await;

            let duration = start.elapsed();
            let route = ctx.route().unwrap_or("unmatched");
            let status = response.status().as_u16();
            record_request(route, status, duration);

            let data = TelemetryData {
                service_name: self.service_name.clone(),
                route: route.to_string(),
                method,
                path,
                status_code: status,
                duration_ms: duration.as_secs_f64() * 1000.0,
                request_id: ctx.request_id().to_string(),
            };

            tracing::info!(
                service = %data.service_name,
                request_id = %data.request_id,
                http.method = %data.method,
                http.path = %data.path,
                route = %data.route,
                http.status_code = data.status_code,
                duration_ms = data.duration_ms,
                "Request completed"
            );

            ctx.set_extension(data);
            response
        })
    }
}
