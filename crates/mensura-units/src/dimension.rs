//! Dimensional analysis.
//!
//! Every unit carries a [`Dimension`]: the exponents of the base quantities
//! `[length, mass, time, current, temperature, amount, luminosity, information]`.
//! Two units can be converted into each other only when their dimensions are equal.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of base quantities tracked by [`Dimension`].
pub const BASE_COUNT: usize = 8;

const BASE_NAMES: [&str; BASE_COUNT] = [
    "length",
    "mass",
    "time",
    "current",
    "temperature",
    "substance",
    "luminosity",
    "information",
];

/// Exponents of the base quantities for a physical quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    exponents: [i32; BASE_COUNT],
}

impl Dimension {
    /// Dimensionless quantity (angles, ratios, counts).
    pub const DIMENSIONLESS: Self = Self::new([0, 0, 0, 0, 0, 0, 0, 0]);
    /// `[length]`
    pub const LENGTH: Self = Self::new([1, 0, 0, 0, 0, 0, 0, 0]);
    /// `[mass]`
    pub const MASS: Self = Self::new([0, 1, 0, 0, 0, 0, 0, 0]);
    /// `[time]`
    pub const TIME: Self = Self::new([0, 0, 1, 0, 0, 0, 0, 0]);
    /// `[current]`
    pub const CURRENT: Self = Self::new([0, 0, 0, 1, 0, 0, 0, 0]);
    /// `[temperature]`
    pub const TEMPERATURE: Self = Self::new([0, 0, 0, 0, 1, 0, 0, 0]);
    /// `[substance]`
    pub const AMOUNT: Self = Self::new([0, 0, 0, 0, 0, 1, 0, 0]);
    /// `[luminosity]`
    pub const LUMINOSITY: Self = Self::new([0, 0, 0, 0, 0, 0, 1, 0]);
    /// `[information]`
    pub const INFORMATION: Self = Self::new([0, 0, 0, 0, 0, 0, 0, 1]);

    /// `[length] ** 2`
    pub const AREA: Self = Self::new([2, 0, 0, 0, 0, 0, 0, 0]);
    /// `[length] ** 3`
    pub const VOLUME: Self = Self::new([3, 0, 0, 0, 0, 0, 0, 0]);
    /// `[length] / [time]`
    pub const VELOCITY: Self = Self::new([1, 0, -1, 0, 0, 0, 0, 0]);
    /// `[length] / [time] ** 2`
    pub const ACCELERATION: Self = Self::new([1, 0, -2, 0, 0, 0, 0, 0]);
    /// `[length] * [mass] / [time] ** 2`
    pub const FORCE: Self = Self::new([1, 1, -2, 0, 0, 0, 0, 0]);
    /// `[length] ** 2 * [mass] / [time] ** 2`
    pub const ENERGY: Self = Self::new([2, 1, -2, 0, 0, 0, 0, 0]);
    /// `[length] ** 2 * [mass] / [time] ** 3`
    pub const POWER: Self = Self::new([2, 1, -3, 0, 0, 0, 0, 0]);
    /// `[mass] / [length] / [time] ** 2`
    pub const PRESSURE: Self = Self::new([-1, 1, -2, 0, 0, 0, 0, 0]);
    /// `1 / [time]`
    pub const FREQUENCY: Self = Self::new([0, 0, -1, 0, 0, 0, 0, 0]);
    /// `[current] * [time]`
    pub const CHARGE: Self = Self::new([0, 0, 1, 1, 0, 0, 0, 0]);
    /// `[length] ** 2 * [mass] / [current] / [time] ** 3`
    pub const VOLTAGE: Self = Self::new([2, 1, -3, -1, 0, 0, 0, 0]);
    /// `[length] ** 2 * [mass] / [current] ** 2 / [time] ** 3`
    pub const RESISTANCE: Self = Self::new([2, 1, -3, -2, 0, 0, 0, 0]);
    /// `[current] ** 2 * [time] ** 4 / [length] ** 2 / [mass]`
    pub const CAPACITANCE: Self = Self::new([-2, -1, 4, 2, 0, 0, 0, 0]);
    /// `[length] ** 2 * [mass] / [current] ** 2 / [time] ** 2`
    pub const INDUCTANCE: Self = Self::new([2, 1, -2, -2, 0, 0, 0, 0]);
    /// `[current] ** 2 * [time] ** 3 / [length] ** 2 / [mass]`
    pub const CONDUCTANCE: Self = Self::new([-2, -1, 3, 2, 0, 0, 0, 0]);
    /// `[length] ** 2 * [mass] / [current] / [time] ** 2`
    pub const MAGNETIC_FLUX: Self = Self::new([2, 1, -2, -1, 0, 0, 0, 0]);
    /// `[mass] / [current] / [time] ** 2`
    pub const MAGNETIC_FLUX_DENSITY: Self = Self::new([0, 1, -2, -1, 0, 0, 0, 0]);
    /// `[luminosity] / [length] ** 2`
    pub const ILLUMINANCE: Self = Self::new([-2, 0, 0, 0, 0, 0, 1, 0]);
    /// `[length] ** 2 / [time] ** 2`
    pub const ABSORBED_DOSE: Self = Self::new([2, 0, -2, 0, 0, 0, 0, 0]);
    /// `[mass] / [length] / [time]`
    pub const DYNAMIC_VISCOSITY: Self = Self::new([-1, 1, -1, 0, 0, 0, 0, 0]);
    /// `[length] ** 2 / [time]`
    pub const KINEMATIC_VISCOSITY: Self = Self::new([2, 0, -1, 0, 0, 0, 0, 0]);

    /// Creates a dimension from raw exponents.
    pub const fn new(exponents: [i32; BASE_COUNT]) -> Self {
        Self { exponents }
    }

    /// Returns the raw exponents.
    pub const fn exponents(&self) -> [i32; BASE_COUNT] {
        self.exponents
    }

    /// Returns `true` when every exponent is zero.
    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Product of two dimensions (exponents add).
    pub fn multiply(&self, other: &Self) -> Self {
        let mut exponents = self.exponents;
        for (e, o) in exponents.iter_mut().zip(other.exponents) {
            *e += o;
        }
        Self { exponents }
    }

    /// Quotient of two dimensions (exponents subtract).
    pub fn divide(&self, other: &Self) -> Self {
        self.multiply(&other.power(-1))
    }

    /// Raises the dimension to an integer power.
    pub fn power(&self, exp: i32) -> Self {
        let mut exponents = self.exponents;
        for e in &mut exponents {
            *e *= exp;
        }
        Self { exponents }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::DIMENSIONLESS
    }
}

impl fmt::Display for Dimension {
    /// Renders as `[length] * [mass] / [time] ** 2`, or `dimensionless`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn term(name: &str, exp: i32) -> String {
            if exp == 1 {
                format!("[{name}]")
            } else {
                format!("[{name}] ** {exp}")
            }
        }

        let numerator: Vec<String> = BASE_NAMES
            .iter()
            .zip(self.exponents)
            .filter(|(_, e)| *e > 0)
            .map(|(name, e)| term(name, e))
            .collect();
        let denominator: Vec<String> = BASE_NAMES
            .iter()
            .zip(self.exponents)
            .filter(|(_, e)| *e < 0)
            .map(|(name, e)| term(name, -e))
            .collect();

        match (numerator.is_empty(), denominator.is_empty()) {
            (true, true) => write!(f, "dimensionless"),
            (false, true) => write!(f, "{}", numerator.join(" * ")),
            (true, false) => write!(f, "1 / {}", denominator.join(" / ")),
            (false, false) => write!(f, "{} / {}", numerator.join(" * "), denominator.join(" / ")),
        }
    }
}
