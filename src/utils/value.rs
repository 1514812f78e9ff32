//! Loose-typed value helpers shared by the settings store and row rules.
//!
//! Source rows and settings exports come from a dynamically typed system, so
//! "is this set" follows the emptiness rules of that system rather than
//! Rust's: `0`, `"0"` and empty containers count as unset.

use serde_json::Value;

/// Returns `true` when the value counts as set / enabled.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => {
            if let Some(i) = number.as_i64() {
                i != 0
            } else if let Some(u) = number.as_u64() {
                u != 0
            } else if let Some(f) = number.as_f64() {
                f != 0.0
            } else {
                false
            }
        }
        Value::String(text) => !(text.is_empty() || text == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Optional-aware variant of [`is_truthy`]; absent is unset.
pub fn is_set(value: Option<&Value>) -> bool {
    value.map(is_truthy).unwrap_or(false)
}

/// Render a scalar the way string concatenation in the source system does.
///
/// Used to build configuration-key suffixes and human-readable messages from
/// row values whose JSON type varies between exports (`"12"` vs `12`).
pub fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(_) => "Array".to_string(),
        Value::Object(_) => "Array".to_string(),
    }
}
