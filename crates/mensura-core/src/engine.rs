//! The conversion engine.

use std::sync::Arc;

use mensura_units::UnitSystem;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::RoundedDecimal;
use crate::error::{ConversionError, CoreResult, UnitSide};
use crate::names::to_registry_form;

/// A conversion request as submitted by a form or JSON client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Magnitude to convert.
    pub quantity: f64,
    /// Source unit, display or registry form.
    pub from_unit: String,
    /// Target unit, display or registry form.
    pub to_unit: String,
}

impl ConversionRequest {
    /// Creates a request.
    pub fn new(quantity: f64, from_unit: impl Into<String>, to_unit: impl Into<String>) -> Self {
        Self {
            quantity,
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
        }
    }
}

/// A successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    /// The request that produced this result.
    #[serde(flatten)]
    pub request: ConversionRequest,
    /// Converted magnitude, rounded to four decimal places.
    pub result: RoundedDecimal,
}

/// Converts quantities through a [`UnitSystem`] and classifies failures.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use mensura_core::{ConversionEngine, ConversionRequest, ErrorKind};
/// use mensura_units::UnitRegistry;
///
/// let engine = ConversionEngine::new(Arc::new(UnitRegistry::new().unwrap()));
///
/// let ok = engine.convert(&ConversionRequest::new(1.0, "meter", "centimeter")).unwrap();
/// assert_eq!(ok.result.to_string(), "100.0000");
///
/// let err = engine.convert(&ConversionRequest::new(1.0, "second", "meter")).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::IncompatibleDimensions);
/// ```
#[derive(Clone)]
pub struct ConversionEngine {
    system: Arc<dyn UnitSystem>,
}

impl std::fmt::Debug for ConversionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionEngine").finish_non_exhaustive()
    }
}

impl ConversionEngine {
    /// Creates an engine over `system`.
    pub fn new(system: Arc<dyn UnitSystem>) -> Self {
        Self { system }
    }

    /// The underlying unit system.
    pub fn system(&self) -> &dyn UnitSystem {
        self.system.as_ref()
    }

    /// Converts `request.quantity` from `request.from_unit` to `request.to_unit`.
    ///
    /// Unit names are accepted in display form (`nautical mile`). The result
    /// is rounded to four decimal places, ties away from zero.
    pub fn convert(&self, request: &ConversionRequest) -> CoreResult<Conversion> {
        let from_name = to_registry_form(&request.from_unit);
        let to_name = to_registry_form(&request.to_unit);

        let from = self
            .system
            .parse_unit(&from_name)
            .map_err(|e| ConversionError::from_resolution(e, &request.from_unit, UnitSide::From))?;
        let to = self
            .system
            .parse_unit(&to_name)
            .map_err(|e| ConversionError::from_resolution(e, &request.to_unit, UnitSide::To))?;

        let magnitude = from
            .convert_to(request.quantity, &to)
            .map_err(|e| ConversionError::from_conversion(e, &request.from_unit, &request.to_unit))?;
        let result = RoundedDecimal::from_f64(magnitude)?;

        debug!(
            quantity = request.quantity,
            from = %from,
            to = %to,
            result = %result,
            "Converted quantity"
        );

        Ok(Conversion {
            request: request.clone(),
            result,
        })
    }
}
