//! Typed configuration for the Mensura server.
//!
//! [`MensuraConfig`] groups five sections: `server`, `assets`, `guard`,
//! `docs` and `telemetry`. [`ConfigLoader`] layers defaults, a TOML or JSON
//! file, `.env` and `MENSURA__SECTION__KEY` environment variables, then
//! validates the result.
//!
//! ```toml
//! [server]
//! http_addr = "0.0.0.0:8000"
//! mount_prefix = "/hx"
//!
//! [guard]
//! marker_header = "HX-Request"
//! allow_list = ["/docs", "/redoc", "/openapi.json"]
//!
//! [telemetry.logging]
//! level = "info"
//! format = "json"
//! ```

#![doc(html_root_url = "https://docs.rs/mensura-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::MensuraConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
