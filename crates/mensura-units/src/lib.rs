//! # Mensura Units
//!
//! Unit registry and dimensional analysis for Mensura.
//!
//! The registry holds a table of unit definitions (SI, imperial, US customary,
//! and a handful of scientific and information units). Names resolve by exact
//! name, symbol or alias, by SI or binary prefix, and by plural form. Unit
//! expressions combine names with `*`, `/` and integer powers.
//!
//! ## Example
//!
//! ```
//! use mensura_units::{Dimension, UnitRegistry, UnitSystem};
//!
//! let registry = UnitRegistry::new().unwrap();
//!
//! let speed = registry.parse_unit("kilometer/hour").unwrap();
//! assert_eq!(speed.dimension(), Dimension::VELOCITY);
//!
//! let mph = registry.convert(100.0, "kilometer/hour", "mile_per_hour").unwrap();
//! assert!((mph - 62.137).abs() < 1e-3);
//! ```

#![doc(html_root_url = "https://docs.rs/mensura-units/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod definitions;
mod dimension;
mod error;
mod parse;
mod prefix;
mod registry;
mod unit;

pub use definitions::DEFAULT_UNITS;
pub use dimension::{Dimension, BASE_COUNT};
pub use error::{UnitError, UnitResult};
pub use prefix::{Prefix, PREFIXES};
pub use registry::{UnitRegistry, UnitSystem};
pub use unit::{Unit, UnitDef};
