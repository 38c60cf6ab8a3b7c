//! Middleware stages.
//!
//! 1. [`request_id`]: assign a UUID v7 and echo it in `x-request-id`.
//! 2. [`telemetry`]: log and count every completed request.
//! 3. [`access_guard`]: turn away fragment routes requested without the
//!    marker header.

pub mod access_guard;
pub mod request_id;
pub mod telemetry;

pub use access_guard::{strip_mount_prefix, AccessGuard, ACCESS_DENIED_MESSAGE};
pub use request_id::{RequestIdMiddleware, REQUEST_ID_HEADER};
pub use telemetry::{TelemetryData, TelemetryMiddleware};
