//! Unit definitions and resolved units.

use std::fmt;

use crate::{Dimension, UnitError, UnitResult};

/// A static entry in the unit table.
///
/// `value_in_base = value * factor + offset`, where the base unit of each
/// dimension is the SI coherent unit (meter, kilogram, second, ...) and `bit`
/// for information.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    /// Canonical registry name, underscores instead of spaces (`nautical_mile`).
    pub name: &'static str,
    /// Short symbol, if any (`nmi`).
    pub symbol: Option<&'static str>,
    /// Additional accepted spellings.
    pub aliases: &'static [&'static str],
    /// Physical dimension.
    pub dimension: Dimension,
    /// Multiplicative factor to the base unit.
    pub factor: f64,
    /// Additive offset to the base unit (non-zero for temperature scales).
    pub offset: f64,
    /// Whether SI and binary prefixes may be attached.
    pub prefixable: bool,
}

impl UnitDef {
    /// A proportional unit without symbol, aliases or prefixes.
    pub const fn new(name: &'static str, dimension: Dimension, factor: f64) -> Self {
        Self {
            name,
            symbol: None,
            aliases: &[],
            dimension,
            factor,
            offset: 0.0,
            prefixable: false,
        }
    }

    /// Sets the symbol.
    pub const fn symbol(mut self, symbol: &'static str) -> Self {
        self.symbol = Some(symbol);
        self
    }

    /// Sets the aliases.
    pub const fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Sets the additive offset.
    pub const fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Allows SI and binary prefixes.
    pub const fn prefixable(mut self) -> Self {
        self.prefixable = true;
        self
    }

    /// Returns `true` for offset (non-multiplicative) units.
    pub fn is_offset(&self) -> bool {
        self.offset != 0.0
    }
}

/// A unit resolved from an expression, ready for conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    name: String,
    dimension: Dimension,
    factor: f64,
    offset: f64,
}

impl Unit {
    /// Creates a resolved unit.
    pub fn new(name: impl Into<String>, dimension: Dimension, factor: f64, offset: f64) -> Self {
        Self {
            name: name.into(),
            dimension,
            factor,
            offset,
        }
    }

    /// The pure number `1`.
    pub fn dimensionless() -> Self {
        Self::new("dimensionless", Dimension::DIMENSIONLESS, 1.0, 0.0)
    }

    pub(crate) fn from_def(def: &UnitDef, prefix_factor: f64, name: String) -> Self {
        Self::new(name, def.dimension, def.factor * prefix_factor, def.offset)
    }

    /// Display name of the expression this unit was resolved from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Physical dimension.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Multiplicative factor to the base unit.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Additive offset to the base unit.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns `true` for offset units such as `degree_Celsius`.
    pub fn is_offset(&self) -> bool {
        self.offset != 0.0
    }

    /// Returns `true` when both units measure the same quantity.
    pub fn is_compatible(&self, other: &Self) -> bool {
        self.dimension == other.dimension
    }

    /// Product of two units. Offset units cannot take part.
    pub fn multiply(&self, other: &Self) -> UnitResult<Self> {
        self.ensure_multiplicative()?;
        other.ensure_multiplicative()?;
        Ok(Self::new(
            format!("{} * {}", self.name, other.name),
            self.dimension.multiply(&other.dimension),
            self.factor * other.factor,
            0.0,
        ))
    }

    /// Quotient of two units. Offset units cannot take part.
    pub fn divide(&self, other: &Self) -> UnitResult<Self> {
        self.ensure_multiplicative()?;
        other.ensure_multiplicative()?;
        Ok(Self::new(
            format!("{} / {}", self.name, other.name),
            self.dimension.divide(&other.dimension),
            self.factor / other.factor,
            0.0,
        ))
    }

    /// Raises the unit to an integer power. Offset units only allow `1`.
    pub fn power(&self, exp: i32) -> UnitResult<Self> {
        if exp == 1 {
            return Ok(self.clone());
        }
        self.ensure_multiplicative()?;
        Ok(Self::new(
            format!("{} ** {}", self.name, exp),
            self.dimension.power(exp),
            self.factor.powi(exp),
            0.0,
        ))
    }

    /// Converts `value` expressed in this unit into `target`.
    pub fn convert_to(&self, value: f64, target: &Self) -> UnitResult<f64> {
        if !self.is_compatible(target) {
            return Err(UnitError::DimensionalityMismatch {
                from: self.name.clone(),
                to: target.name.clone(),
                from_dimension: self.dimension,
                to_dimension: target.dimension,
            });
        }

        let converted = if self.is_offset() || target.is_offset() {
            let base = value.mul_add(self.factor, self.offset);
            (base - target.offset) / target.factor
        } else {
            value * (self.factor / target.factor)
        };

        if converted.is_finite() {
            Ok(converted)
        } else {
            Err(UnitError::NonFiniteResult {
                value,
                from: self.name.clone(),
                to: target.name.clone(),
            })
        }
    }

    fn ensure_multiplicative(&self) -> UnitResult<()> {
        if self.is_offset() {
            Err(UnitError::offset_unit(&self.name))
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
