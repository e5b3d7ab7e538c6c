//! Alias resolution: the same semantic field arrives under several names
//! depending on which workflow produced the record. Each entity declares a
//! priority-ordered alias list per field; [`pick`] takes the first alias
//! holding a usable value.

use serde_json::Value;

/// A value counts as present unless it is null, `false` or a blank string.
pub fn is_usable(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

pub fn pick<'a>(record: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|key| record.get(*key))
        .find(|v| is_usable(v))
}

/// Text rendering of a scalar: strings as-is, numbers and booleans printed.
pub fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn pick_text(record: &Value, aliases: &[&str]) -> Option<String> {
    pick(record, aliases).and_then(value_text)
}

pub fn pick_text_or(record: &Value, aliases: &[&str], default: &str) -> String {
    pick_text(record, aliases).unwrap_or_else(|| default.to_string())
}

/// Numeric field, accepting numbers and numeric strings.
pub fn pick_f64(record: &Value, aliases: &[&str]) -> Option<f64> {
    match pick(record, aliases)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

pub fn pick_i64(record: &Value, aliases: &[&str]) -> Option<i64> {
    pick_f64(record, aliases).map(|n| n.trunc() as i64)
}
