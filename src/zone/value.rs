//! Coercion of loosely typed JSON scalars.
//!
//! Zone authors write TTLs, weights and serials either as bare numbers or as
//! quoted strings, so every integer read from a zone document goes through
//! here.

use super::{Result, ZoneError};
use serde_json::Value;

/// Convert a number (truncated toward zero) or a base-10 integer string.
pub fn value_to_int(value: &Value) -> Result<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.is_u64() {
                return Err(ZoneError::config_value(value, "out of range"));
            }
            match n.as_f64().map(f64::trunc) {
                Some(f) if (i64::MIN as f64..i64::MAX as f64).contains(&f) => Ok(f as i64),
                _ => Err(ZoneError::config_value(value, "out of range")),
            }
        }
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|e| ZoneError::config_value(value, e.to_string())),
        _ => Err(ZoneError::config_value(
            value,
            "expected a number or a numeric string",
        )),
    }
}

/// Like [`value_to_int`], additionally checking the result fits `T`.
pub fn value_to<T: TryFrom<i64>>(value: &Value) -> Result<T> {
    let i = value_to_int(value)?;
    T::try_from(i).map_err(|_| ZoneError::config_value(value, "out of range"))
}
