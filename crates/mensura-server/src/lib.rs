//! # Mensura Server
//!
//! The HTTP side of Mensura: routes, handlers, static assets, health probes
//! and the listener.
//!
//! | Route | Method | Guarded | Response |
//! |-------|--------|---------|----------|
//! | `/` | GET | no | Converter page |
//! | `/suggestions` | GET | yes | `<option>` fragment |
//! | `/convert` | POST (form) | yes | Result or error fragment |
//! | `/json/convert` | POST (JSON) | no | `{"result": number}` |
//! | `/docs`, `/redoc`, `/openapi.json` | GET | allow-listed | API documentation |
//! | `/static/*` | GET, HEAD | no | Assets |
//! | `/health`, `/ready`, `/metrics` | GET | no | Probes |
//!
//! Every route is served under the configured mount prefix.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mensura_server::{App, Server, ServerSettings};
//!
//! let app = App::new(&config, Arc::new(UnitRegistry::new()?))?;
//! Server::new(app, ServerSettings::from(&config.server)).run().await?;
//! ```

#![doc(html_root_url = "https://docs.rs/mensura-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod app;
pub mod error;
pub mod extract;
mod handlers;
pub mod health;
pub mod html;
pub mod router;
pub mod server;
pub mod shutdown;
pub mod static_files;

pub use app::App;
pub use error::{ServerError, ServerResult};
pub use health::{HealthCheck, HealthStatus, ReadinessCheck, ReadinessStatus};
pub use router::{Resolution, Route, Router};
pub use server::{Server, ServerSettings};
pub use shutdown::{ConnectionTracker, ShutdownSignal};
pub use static_files::{StaticFileError, StaticFiles};
