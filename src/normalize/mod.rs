//! Response normalizer: turn a webhook reply of unknown shape into an
//! ordered list of record objects.
//!
//! Accepted shapes:
//! - `null` / empty               → no records
//! - `[ ... ]`                    → every element
//! - `{ "<container>": [ ... ] }` → the first container key holding an array
//! - anything else                → no records
//!
//! Elements wrapped as `{ "json": { ... } }` (gateway item envelope) are
//! unwrapped one level. Nothing here fails.

pub mod alias;

use serde_json::Value;
use tracing::warn;

/// Container keys probed, in priority order, when the reply is an object.
pub const CONTAINER_KEYS: [&str; 6] = ["data", "rows", "users", "shifts", "items", "output"];

/// Envelope key wrapping a single item.
pub const ITEM_WRAPPER_KEY: &str = "json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Empty,
    List,
    Wrapped(&'static str),
    Unrecognized,
}

/// Which branch of the normalizer a reply takes.
pub fn classify(raw: &Value) -> ResponseShape {
    match raw {
        Value::Null => ResponseShape::Empty,
        Value::Array(_) => ResponseShape::List,
        Value::String(s) if s.is_empty() => ResponseShape::Empty,
        Value::Object(map) if map.is_empty() => ResponseShape::Empty,
        Value::Object(map) => CONTAINER_KEYS
            .iter()
            .find(|k| map.get(**k).is_some_and(Value::is_array))
            .map(|k| ResponseShape::Wrapped(*k))
            .unwrap_or(ResponseShape::Unrecognized),
        _ => ResponseShape::Unrecognized,
    }
}

pub fn normalize_list(raw: &Value) -> Vec<Value> {
    let items = match (classify(raw), raw) {
        (ResponseShape::List, Value::Array(items)) => items,
        (ResponseShape::Wrapped(key), Value::Object(map)) => match map.get(key) {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items.iter().map(unwrap_item).cloned().collect()
}

/// Like [`normalize_list`], logging replies whose shape was not recognized.
pub fn normalize_logged(raw: &Value, context: &str) -> Vec<Value> {
    if classify(raw) == ResponseShape::Unrecognized {
        warn!(context, "unrecognized reply shape, treating as no records");
    }
    normalize_list(raw)
}

/// The single record of a reply: the first normalized item, or the whole
/// payload when the reply holds no list.
pub fn first_record(raw: &Value) -> Value {
    normalize_list(raw)
        .into_iter()
        .next()
        .unwrap_or_else(|| raw.clone())
}

fn unwrap_item(item: &Value) -> &Value {
    match item.get(ITEM_WRAPPER_KEY) {
        Some(inner @ Value::Object(_)) => inner,
        _ => item,
    }
}
