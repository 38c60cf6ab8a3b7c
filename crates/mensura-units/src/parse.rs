//! Unit expression parsing: `kilometer/hour`, `meter**2`, `kg*m/s^2`.
//!
//! Operators apply left to right, so `a/b*c` is `(a/b)*c`. Whitespace and
//! underscores around operators are ignored, which lets display names with
//! spaces (`meter / second` becomes `meter_/_second`) parse the same way.

use std::sync::OnceLock;

use regex::Regex;

use crate::{Dimension, Unit, UnitError, UnitResult};

/// `base` or `base^exp`, with `_` or whitespace padding.
fn factor_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[\s_]*(?P<base>[^\s^]+?)[\s_]*(?:\^[\s_]*(?P<exp>[+-]?\d+))?[\s_]*$")
            .expect("valid regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Mul,
    Div,
}

/// Parses `expression`, resolving each base name through `resolve`.
///
/// An empty expression is the dimensionless unit.
pub fn parse_expression<F>(expression: &str, resolve: F) -> UnitResult<Unit>
where
    F: Fn(&str) -> UnitResult<Unit>,
{
    let normalized = expression.replace("**", "^");
    if normalized.trim_matches(|c: char| c.is_whitespace() || c == '_').is_empty() {
        return Ok(Unit::dimensionless());
    }

    let mut result: Option<Unit> = None;
    for (op, factor) in split_factors(&normalized) {
        let unit = parse_factor(expression, factor, &resolve)?;
        result = Some(match (result, op) {
            (None, _) => unit,
            (Some(acc), Op::Mul) => acc.multiply(&unit)?,
            (Some(acc), Op::Div) => acc.divide(&unit)?,
        });
    }

    result.ok_or_else(|| UnitError::invalid_expression(expression, "no unit given"))
}

fn split_factors(expression: &str) -> Vec<(Op, &str)> {
    let mut factors = Vec::new();
    let mut op = Op::Mul;
    let mut start = 0;

    for (i, c) in expression.char_indices() {
        let next = match c {
            '*' => Op::Mul,
            '/' => Op::Div,
            _ => continue,
        };
        factors.push((op, &expression[start..i]));
        op = next;
        start = i + c.len_utf8();
    }
    factors.push((op, &expression[start..]));
    factors
}

fn parse_factor<F>(expression: &str, factor: &str, resolve: &F) -> UnitResult<Unit>
where
    F: Fn(&str) -> UnitResult<Unit>,
{
    let captures = factor_pattern().captures(factor).ok_or_else(|| {
        let reason = if factor.trim_matches(|c: char| c.is_whitespace() || c == '_').is_empty() {
            "missing operand".to_string()
        } else {
            format!("cannot parse '{}'", factor.trim())
        };
        UnitError::invalid_expression(expression, reason)
    })?;

    let base = &captures["base"];
    let exponent = match captures.name("exp") {
        Some(exp) => exp.as_str().parse::<i32>().map_err(|_| {
            UnitError::invalid_expression(expression, format!("exponent '{}' is out of range", exp.as_str()))
        })?,
        None => 1,
    };

    let unit = parse_base(base, resolve)?;
    unit.power(exponent)
}

/// A number, `square_`/`cubic_` modified name, or plain unit name.
fn parse_base<F>(base: &str, resolve: &F) -> UnitResult<Unit>
where
    F: Fn(&str) -> UnitResult<Unit>,
{
    if let Ok(number) = base.parse::<f64>() {
        if number.is_finite() && number != 0.0 {
            return Ok(Unit::new(base, Dimension::DIMENSIONLESS, number, 0.0));
        }
    }

    if let Some(rest) = base.strip_prefix("square_") {
        return resolve(rest)?.power(2);
    }
    if let Some(rest) = base.strip_prefix("cubic_") {
        return resolve(rest)?.power(3);
    }

    resolve(base)
}
