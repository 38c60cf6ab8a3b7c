//! Error types for catalog construction and conversion.
//!
//! Conversion failures are classified into three kinds, each with its own
//! HTTP status:
//!
//! | Kind | Status | Code |
//! |---|---|---|
//! | `UnknownUnit` | 422 | `UNKNOWN_UNIT` |
//! | `IncompatibleDimensions` | 422 | `INCOMPATIBLE_DIMENSIONS` |
//! | `Internal` | 500 | `CONVERSION_ERROR` |

use std::fmt;

use http::StatusCode;
use mensura_units::UnitError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`ConversionError`].
pub type CoreResult<T> = Result<T, ConversionError>;

/// Which side of a conversion request an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSide {
    /// The `from_unit` field.
    From,
    /// The `to_unit` field.
    To,
}

impl UnitSide {
    /// Form or JSON field name for this side.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::From => "from_unit",
            Self::To => "to_unit",
        }
    }
}

impl fmt::Display for UnitSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => write!(f, "source"),
            Self::To => write!(f, "target"),
        }
    }
}

/// Classification of a [`ConversionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A unit name could not be resolved.
    UnknownUnit,
    /// Both units resolved but measure different quantities.
    IncompatibleDimensions,
    /// Anything else raised while converting.
    Internal,
}

impl ErrorKind {
    /// Status code used by the HTML fragment binding.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownUnit | Self::IncompatibleDimensions => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownUnit => "UNKNOWN_UNIT",
            Self::IncompatibleDimensions => "INCOMPATIBLE_DIMENSIONS",
            Self::Internal => "CONVERSION_ERROR",
        }
    }
}

/// A classified conversion failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// A supplied unit name is not known to the registry.
    #[error("Unknown {side} unit '{name}'")]
    UnknownUnit {
        /// The unit name as submitted.
        name: String,
        /// Which field carried it.
        side: UnitSide,
    },

    /// The two units measure different physical quantities.
    #[error("Cannot convert from '{from}' ({from_dimension}) to '{to}' ({to_dimension})")]
    IncompatibleDimensions {
        /// Source unit as submitted.
        from: String,
        /// Target unit as submitted.
        to: String,
        /// Dimension of the source unit.
        from_dimension: String,
        /// Dimension of the target unit.
        to_dimension: String,
    },

    /// Any other failure from the conversion step.
    #[error("Conversion failed: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
        /// The underlying registry error, when there is one.
        #[source]
        source: Option<UnitError>,
    },
}

impl ConversionError {
    /// Creates an unknown unit error.
    #[must_use]
    pub fn unknown_unit(name: impl Into<String>, side: UnitSide) -> Self {
        Self::UnknownUnit {
            name: name.into(),
            side,
        }
    }

    /// Creates an internal error without a source.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Classifies a registry error raised while resolving one side.
    #[must_use]
    pub fn from_resolution(error: UnitError, name: &str, side: UnitSide) -> Self {
        match error {
            UnitError::UndefinedUnit { .. } => Self::unknown_unit(name, side),
            other => Self::from_unit_error(other),
        }
    }

    /// Classifies a registry error raised by the conversion itself.
    #[must_use]
    pub fn from_conversion(error: UnitError, from: &str, to: &str) -> Self {
        match error {
            UnitError::DimensionalityMismatch {
                from_dimension,
                to_dimension,
                ..
            } => Self::IncompatibleDimensions {
                from: from.to_string(),
                to: to.to_string(),
                from_dimension: from_dimension.to_string(),
                to_dimension: to_dimension.to_string(),
            },
            other => Self::from_unit_error(other),
        }
    }

    fn from_unit_error(error: UnitError) -> Self {
        Self::Internal {
            message: error.to_string(),
            source: Some(error),
        }
    }

    /// Returns the classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownUnit { .. } => ErrorKind::UnknownUnit,
            Self::IncompatibleDimensions { .. } => ErrorKind::IncompatibleDimensions,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Status code used by the HTML fragment binding.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.kind().status_code()
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// The side that caused the error, when known.
    #[must_use]
    pub const fn side(&self) -> Option<UnitSide> {
        match self {
            Self::UnknownUnit { side, .. } => Some(*side),
            _ => None,
        }
    }
}

/// Errors raised while building the unit catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The unit system produced no unit names.
    #[error("The unit registry defines no units")]
    Empty,

    /// The unit registry could not be built.
    #[error("Failed to build the unit registry: {0}")]
    Registry(#[from] UnitError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use mensura_units::Dimension;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ConversionError::unknown_unit("foo", UnitSide::From).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ConversionError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unknown_unit_message_names_side() {
        let err = ConversionError::unknown_unit("foo", UnitSide::From);
        assert_eq!(err.to_string(), "Unknown source unit 'foo'");
        assert_eq!(err.side(), Some(UnitSide::From));

        let err = ConversionError::unknown_unit("bar", UnitSide::To);
        assert_eq!(err.to_string(), "Unknown target unit 'bar'");
    }

    #[test]
    fn test_classify_resolution_errors() {
        let err = ConversionError::from_resolution(UnitError::undefined("foo"), "foo", UnitSide::To);
        assert_eq!(err.kind(), ErrorKind::UnknownUnit);

        let err = ConversionError::from_resolution(
            UnitError::offset_unit("degree_Celsius"),
            "degree Celsius / second",
            UnitSide::From,
        );
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.code(), "CONVERSION_ERROR");
    }

    #[test]
    fn test_classify_dimensionality() {
        let source = UnitError::DimensionalityMismatch {
            from: "second".into(),
            to: "meter".into(),
            from_dimension: Dimension::TIME,
            to_dimension: Dimension::LENGTH,
        };
        let err = ConversionError::from_conversion(source, "second", "meter");
        assert_eq!(err.kind(), ErrorKind::IncompatibleDimensions);
        assert_eq!(
            err.to_string(),
            "Cannot convert from 'second' ([time]) to 'meter' ([length])"
        );
        assert_eq!(err.side(), None);
    }

    #[test]
    fn test_side_serialization() {
        assert_eq!(serde_json::to_string(&UnitSide::From).unwrap(), "\"from\"");
        assert_eq!(UnitSide::To.field(), "to_unit");
    }
}
