//! Conversion evaluator
//!
//! Parses the raw input, looks up the rule for the requested pair, applies
//! it and formats the result. Every failure comes back as a
//! [`ConversionError`]; nothing here panics or touches the registry.

use tracing::{debug, trace};
use unitconv_core::{ConversionError, ConversionKey};
use crate::ConversionRegistry;

/// Parse user input as a finite number.
///
/// Surrounding ASCII whitespace is ignored. On failure the error carries the
/// input exactly as received.
pub fn parse_input(raw: &str) -> Result<f64, ConversionError> {
    match raw.trim_matches(|c: char| c.is_ascii_whitespace()).parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ConversionError::parse(raw)),
    }
}

/// Default numeric formatting: shortest representation that round-trips,
/// no trailing ".0" ("32", "25.4", "2.2046244201837775").
pub fn format_value(value: f64) -> String {
    format!("{}", value)
}

/// Apply the rule registered for `(source, destination)` to a number
pub fn convert_value(
    registry: &ConversionRegistry,
    source: &str,
    destination: &str,
    value: f64,
) -> Result<f64, ConversionError> {
    let key = ConversionKey::new(source, destination);

    let rule = match registry.lookup(&key) {
        Some(rule) => rule,
        None => {
            debug!(%key, "no rule registered");
            return Err(ConversionError::unsupported(key));
        }
    };

    let result = rule.apply(value);
    if !result.is_finite() {
        debug!(%key, value, result, "rule produced a non-finite result");
        return Err(ConversionError::NonFinite { key, value: result });
    }

    trace!(%key, %rule, value, result, "converted");
    Ok(result)
}

/// Convert raw user input from one unit to another.
///
/// ```text
/// convert(&registry, "Inches (in)", "Centimeters (cm)", "10") -> Ok("25.4")
/// convert(&registry, "Inches (in)", "Kilograms (kg)", "5")    -> Err(Unsupported)
/// convert(&registry, "Inches (in)", "Centimeters (cm)", "abc") -> Err(Parse)
/// ```
pub fn convert(
    registry: &ConversionRegistry,
    source: &str,
    destination: &str,
    raw_input: &str,
) -> Result<String, ConversionError> {
    let value = parse_input(raw_input)
        .inspect_err(|_| debug!(input = raw_input, "rejected input"))?;
    let result = convert_value(registry, source, destination, value)?;
    Ok(format_value(result))
}
