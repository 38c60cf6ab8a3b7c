//! # Mensura Middleware
//!
//! The request pipeline every Mensura route runs through.
//!
//! A [`Pipeline`] is an ordered list of [`Middleware`] stages followed by a
//! handler. The application builds two: one for public routes and one for
//! fragment routes, which adds the [`AccessGuard`](stages::AccessGuard).
//!
//! | Stage | Purpose |
//! |-------|---------|
//! | `request_id` | Assign a UUID v7, echo it in `x-request-id` |
//! | `telemetry` | Log the completed request, record metrics |
//! | `access_guard` | 403 without the marker header, except allow-listed paths |
//!
//! ## Example
//!
//! ```
//! use mensura_middleware::pipeline::Pipeline;
//! use mensura_middleware::stages::{AccessGuard, RequestIdMiddleware, TelemetryMiddleware};
//!
//! let pipeline = Pipeline::builder()
//!     .stage(RequestIdMiddleware::new())
//!     .stage(TelemetryMiddleware::new("mensura"))
//!     .stage(AccessGuard::new("HX-Request").unwrap().allow(["/docs"]))
//!     .build();
//!
//! assert_eq!(pipeline.stage_names(), vec!["request_id", "telemetry", "access_guard"]);
//! ```

#![doc(html_root_url = "https://docs.rs/mensura-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod context;
pub mod middleware;
pub mod pipeline;
pub mod stages;
pub mod types;

pub use context::{MiddlewareContext, RequestId};
pub use middleware::{BoxFuture, Middleware, Next};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use types::{Request, Response, ResponseExt};
