//! Error types for unit resolution and conversion.

use thiserror::Error;

use crate::Dimension;

/// Result type alias using [`UnitError`].
pub type UnitResult<T> = Result<T, UnitError>;

/// Errors raised by the unit registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    /// A name in the expression is not defined in the registry.
    #[error("'{name}' is not defined in the unit registry")]
    UndefinedUnit {
        /// The name that could not be resolved.
        name: String,
    },

    /// Both units resolved but measure different physical quantities.
    #[error("Cannot convert from '{from}' ({from_dimension}) to '{to}' ({to_dimension})")]
    DimensionalityMismatch {
        /// Source unit expression.
        from: String,
        /// Target unit expression.
        to: String,
        /// Dimension of the source unit.
        from_dimension: Dimension,
        /// Dimension of the target unit.
        to_dimension: Dimension,
    },

    /// An offset unit (such as `degree_Celsius`) appeared inside a compound expression.
    #[error("Ambiguous operation with offset unit ({unit})")]
    OffsetUnitCalculus {
        /// The offset unit involved.
        unit: String,
    },

    /// The expression could not be parsed.
    #[error("Invalid unit expression '{expression}': {reason}")]
    InvalidExpression {
        /// The offending expression.
        expression: String,
        /// What went wrong.
        reason: String,
    },

    /// The conversion produced an infinite or NaN magnitude.
    #[error("Conversion of {value} from '{from}' to '{to}' does not produce a finite magnitude")]
    NonFiniteResult {
        /// Input magnitude.
        value: f64,
        /// Source unit expression.
        from: String,
        /// Target unit expression.
        to: String,
    },

    /// Two definitions claim the same name, symbol or alias.
    #[error("Duplicate unit definition for '{key}'")]
    DuplicateDefinition {
        /// The conflicting key.
        key: String,
    },
}

impl UnitError {
    /// Creates an undefined unit error.
    #[must_use]
    pub fn undefined(name: impl Into<String>) -> Self {
        Self::UndefinedUnit { name: name.into() }
    }

    /// Creates an invalid expression error.
    #[must_use]
    pub fn invalid_expression(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidExpression {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    /// Creates an offset unit error.
    #[must_use]
    pub fn offset_unit(unit: impl Into<String>) -> Self {
        Self::OffsetUnitCalculus { unit: unit.into() }
    }

    /// Returns `true` when the error means a name could not be resolved.
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::UndefinedUnit { .. })
    }

    /// Returns `true` when the error is a dimensionality mismatch.
    #[must_use]
    pub fn is_dimensionality(&self) -> bool {
        matches!(self, Self::DimensionalityMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            UnitError::undefined("foo").to_string(),
            "'foo' is not defined in the unit registry"
        );

        let err = UnitError::DimensionalityMismatch {
            from: "second".into(),
            to: "meter".into(),
            from_dimension: Dimension::TIME,
            to_dimension: Dimension::LENGTH,
        };
        assert_eq!(
            err.to_string(),
            "Cannot convert from 'second' ([time]) to 'meter' ([length])"
        );
        assert!(err.is_dimensionality());
        assert!(!err.is_undefined());
    }
}
