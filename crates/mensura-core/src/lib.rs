//! # Mensura Core
//!
//! The conversion pipeline behind Mensura:
//!
//! - [`UnitCatalog`]: sorted display names of every known unit, built once at
//!   startup and shared read-only.
//! - [`UnitCatalog::suggest`]: case-sensitive substring suggestions, at most
//!   ten, with a `"No units found"` sentinel.
//! - [`ConversionEngine`]: converts between unit names in display form and
//!   rounds to four decimal places, ties away from zero.
//! - [`ConversionError`]: failures classified as unknown unit, incompatible
//!   dimensions or internal, each mapped to an HTTP status.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use mensura_core::{ConversionEngine, ConversionRequest, UnitCatalog};
//! use mensura_units::UnitRegistry;
//!
//! let registry = Arc::new(UnitRegistry::new().unwrap());
//! let catalog = UnitCatalog::from_system(registry.as_ref()).unwrap();
//! let engine = ConversionEngine::new(registry);
//!
//! assert_eq!(catalog.suggest(Some("zzzznotaunit")).names(), vec!["No units found"]);
//!
//! let conversion = engine
//!     .convert(&ConversionRequest::new(1.0, "meter", "centimeter"))
//!     .unwrap();
//! assert_eq!(conversion.result.to_string(), "100.0000");
//! ```

#![doc(html_root_url = "https://docs.rs/mensura-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod catalog;
mod decimal;
mod engine;
mod error;
pub mod names;

pub use catalog::{Suggestions, UnitCatalog, MAX_SUGGESTIONS, NO_UNITS_FOUND};
pub use decimal::{RoundedDecimal, DECIMAL_PLACES};
pub use engine::{Conversion, ConversionEngine, ConversionRequest};
pub use error::{CatalogError, ConversionError, CoreResult, ErrorKind, UnitSide};
