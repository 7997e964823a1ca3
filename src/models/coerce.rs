//! Type coercion for loosely-typed JSON input.
//!
//! The boundary accepts numbers either as JSON numbers or as numeric
//! strings. These helpers turn such values into the typed fields of the
//! domain model, failing with [`EngineError::ValidationError`] otherwise.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{EngineError, EngineResult};

/// Coerces a JSON value into a decimal amount.
///
/// Accepts JSON numbers and strings holding a decimal or scientific
/// literal. Surrounding whitespace in strings is ignored.
///
/// # Example
///
/// ```
/// use attendance_payroll::models::coerce_decimal;
/// use rust_decimal::Decimal;
/// use serde_json::json;
///
/// assert_eq!(coerce_decimal("annual_package", &json!("271000")).unwrap(), Decimal::from(271000));
/// assert!(coerce_decimal("annual_package", &json!("lots")).is_err());
/// ```
pub fn coerce_decimal(field: &str, value: &Value) -> EngineResult<Decimal> {
    match value {
        Value::Number(n) => parse_decimal(field, &n.to_string()),
        Value::String(s) => parse_decimal(field, s.trim()),
        other => Err(EngineError::validation(
            field,
            format!("expected a number, got {}", other),
        )),
    }
}

fn parse_decimal(field: &str, text: &str) -> EngineResult<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| EngineError::validation(field, format!("not a number: '{}'", text)))
}

/// Coerces a JSON value into a non-negative whole-day count.
///
/// Accepts JSON integers, floats with no fractional part, and strings
/// holding an integer.
pub fn coerce_count(field: &str, value: &Value) -> EngineResult<u32> {
    let invalid = |detail: String| EngineError::validation(field, detail);

    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return u32::try_from(v).map_err(|_| invalid(format!("{} is too large", v)));
            }
            if n.as_i64().is_some() {
                return Err(invalid(format!("{} must not be negative", n)));
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u32::MAX) => {
                    Ok(f as u32)
                }
                _ => Err(invalid(format!("{} is not a whole number of days", n))),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| invalid(format!("not a whole number of days: '{}'", s))),
        other => Err(invalid(format!("expected a whole number, got {}", other))),
    }
}

/// Coerces a JSON scalar into text.
///
/// `null` becomes the empty string; objects and arrays are rejected.
pub fn coerce_text(field: &str, value: &Value) -> EngineResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(EngineError::validation(
            field,
            format!("expected text, got {}", other),
        )),
    }
}
