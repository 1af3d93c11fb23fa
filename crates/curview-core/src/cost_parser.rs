//! Permissive cost parsing
//!
//! Report exports carry costs as numbers, plain numeric strings, or strings
//! with a unit suffix such as `"12.50 USD"`. Parsing never fails: anything
//! without a leading numeric literal is treated as `0.0` so a single bad cell
//! can't stop a dashboard from rendering.
//!
//! # Examples
//!
//! ```
//! use curview_core::cost_parser::parse_cost_str;
//!
//! assert_eq!(parse_cost_str("12.50 USD"), 12.5);
//! assert_eq!(parse_cost_str("-3e2"), -300.0);
//! assert_eq!(parse_cost_str("$12"), 0.0);
//! ```

use crate::types::Amount;
use once_cell::sync::Lazy;
use regex::Regex;

/// Normalize a raw cost value to a float
///
/// Numeric values are returned unchanged; text goes through [`parse_cost_str`].
pub fn parse_cost(value: &Amount) -> f64 {
    match value {
        Amount::Number(n) => *n,
        Amount::Text(s) => parse_cost_str(s),
    }
}

/// Parse the leading numeric literal of `text`, or `0.0` if there is none
pub fn parse_cost_str(text: &str) -> f64 {
    try_parse_cost_str(text).unwrap_or(0.0)
}

/// Parse the leading numeric literal of `text`
///
/// Returns `None` when the text does not start (after leading whitespace)
/// with a number, or when the number overflows to infinity. Trailing
/// characters after the literal are ignored.
pub fn try_parse_cost_str(text: &str) -> Option<f64> {
    let literal = LEADING_NUMBER.as_ref()?.find(text.trim_start())?;
    literal
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Whether a raw value would need the zero fallback
pub fn is_unparsable(value: &Amount) -> bool {
    match value {
        Amount::Number(_) => false,
        Amount::Text(s) => try_parse_cost_str(s).is_none(),
    }
}

// `[+-]digits[.digits][(e|E)[+-]digits]`; an incomplete exponent is left out
static LEADING_NUMBER: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").ok()
});
