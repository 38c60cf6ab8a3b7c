//! # Mensura
//!
//! A unit conversion web service. The converter page fetches unit
//! suggestions and conversion results as HTML fragments with htmx; the
//! same conversion is available as JSON.
//!
//! | Crate | Contents |
//! |-------|----------|
//! | [`units`] | Unit registry and dimensional analysis |
//! | [`core`] | Unit catalog, suggestions and the conversion engine |
//! | [`middleware`] | Request id, telemetry and access guard stages |
//! | [`config`] | Layered configuration |
//! | [`telemetry`] | Logging and Prometheus metrics |
//! | [`docs`] | OpenAPI document, Swagger UI and ReDoc |
//! | [`server`] | Routes, handlers and the HTTP listener |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mensura::config::MensuraConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = MensuraConfig::default();
//!     mensura::server(&config)?.run().await?;
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/mensura/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::sync::Arc;

pub use mensura_config as config;
pub use mensura_core as core;
pub use mensura_docs as docs;
pub use mensura_middleware as middleware;
pub use mensura_server as server;
pub use mensura_telemetry as telemetry;
pub use mensura_units as units;

use mensura_config::MensuraConfig;
use mensura_core::CatalogError;
use mensura_server::{App, Server, ServerResult, ServerSettings};
use mensura_units::UnitRegistry;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Assembles the application over the built-in unit registry.
///
/// ```
/// use mensura::config::MensuraConfig;
///
/// let app = mensura::app(&MensuraConfig::default()).unwrap();
/// assert!(app.catalog().contains("nautical mile"));
/// ```
pub fn app(config: &MensuraConfig) -> ServerResult<App> {
    let registry = UnitRegistry::new().map_err(CatalogError::from)?;
    App::new(config, Arc::new(registry))
}

/// Assembles the application and its listener.
pub fn server(config: &MensuraConfig) -> ServerResult<Server> {
    Ok(Server::new(app(config)?, ServerSettings::from(&config.server)))
}

/// Commonly used types.
pub mod prelude {
    pub use mensura_config::{ConfigLoader, MensuraConfig};
    pub use mensura_core::{Conversion, ConversionEngine, ConversionError, ConversionRequest, UnitCatalog};
    pub use mensura_server::{App, Server, ServerSettings, ShutdownSignal};
    pub use mensura_units::{UnitRegistry, UnitSystem};
}
