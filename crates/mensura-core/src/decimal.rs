//! Exact decimal rounding of conversion results.
//!
//! A converted magnitude is taken from its shortest round-trip string form
//! (`0.1`, not `0.1000000000000000055511151231257827`) and rounded as an exact
//! decimal, so binary floating point noise never decides a tie.

use std::fmt;
use std::str::FromStr;

use dashu_int::UBig;
use serde::{Serialize, Serializer};

use crate::{ConversionError, CoreResult};

/// Fractional digits kept by [`RoundedDecimal`].
pub const DECIMAL_PLACES: usize = 4;

/// A decimal with exactly [`DECIMAL_PLACES`] fractional digits.
///
/// # Example
///
/// ```
/// use mensura_core::RoundedDecimal;
///
/// let value = RoundedDecimal::from_f64(2.54).unwrap();
/// assert_eq!(value.to_string(), "2.5400");
///
/// // ties round away from zero
/// assert_eq!(RoundedDecimal::from_f64(0.00005).unwrap().to_string(), "0.0001");
/// assert_eq!(RoundedDecimal::from_f64(-0.00005).unwrap().to_string(), "-0.0001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundedDecimal {
    negative: bool,
    /// Magnitude in units of `10^-DECIMAL_PLACES`.
    scaled: UBig,
}

impl RoundedDecimal {
    /// Rounds `value` to [`DECIMAL_PLACES`] digits, ties away from zero.
    ///
    /// Fails for NaN and infinities.
    pub fn from_f64(value: f64) -> CoreResult<Self> {
        if !value.is_finite() {
            return Err(ConversionError::internal(format!(
                "{value} cannot be represented as a decimal"
            )));
        }
        // f64's Display never uses exponent notation and round-trips exactly
        value.to_string().parse()
    }

    /// Returns `true` for values below zero. Zero is never negative.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Nearest `f64`, for JSON output.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(0.0)
    }

    fn scale_factor(digits: usize) -> UBig {
        UBig::from(10u8).pow(digits)
    }
}

impl FromStr for RoundedDecimal {
    type Err = ConversionError;

    /// Parses a plain decimal literal (`-12.34567`) and rounds it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConversionError::internal(format!("'{s}' is not a decimal number"));

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits, ""));

        let well_formed = !(integer.is_empty() && fraction.is_empty())
            && integer.bytes().all(|b| b.is_ascii_digit())
            && fraction.bytes().all(|b| b.is_ascii_digit());
        if !well_formed {
            return Err(invalid());
        }

        let mantissa_digits = format!("{integer}{fraction}");
        let mantissa: UBig = if mantissa_digits.is_empty() {
            UBig::ZERO
        } else {
            mantissa_digits.parse().map_err(|_| invalid())?
        };

        let scale = fraction.len();
        let scaled = if scale <= DECIMAL_PLACES {
            mantissa * Self::scale_factor(DECIMAL_PLACES - scale)
        } else {
            let divisor = Self::scale_factor(scale - DECIMAL_PLACES);
            let quotient = &mantissa / &divisor;
            let remainder = &mantissa % &divisor;
            if &remainder + &remainder >= divisor {
                quotient + UBig::ONE
            } else {
                quotient
            }
        };

        Ok(Self {
            negative: negative && scaled != UBig::ZERO,
            scaled,
        })
    }
}

impl fmt::Display for RoundedDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divisor = Self::scale_factor(DECIMAL_PLACES);
        let integer = &self.scaled / &divisor;
        let fraction = &self.scaled % &divisor;
        let sign = if self.negative { "-" } else { "" };
        write!(
            f,
            "{sign}{integer}.{:0>width$}",
            fraction.to_string(),
            width = DECIMAL_PLACES
        )
    }
}

impl Serialize for RoundedDecimal {
    /// Serializes as a JSON number.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}
