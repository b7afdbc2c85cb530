//! Matching desired connectors to discovered ones.

use crate::types::{Config, ConnectorConfig};
use serde_json::Value;

/// Find the discovered connector with the given name.
pub fn find_connector<'a>(name: &str, existing: &'a [ConnectorConfig]) -> Option<&'a ConnectorConfig> {
    existing.iter().find(|c| c.name == name)
}

/// Whether two config documents are the same.
///
/// The Connect API echoes every value back as a string, so scalars are
/// compared by their text: `1` equals `"1"` but not `1.0`.
pub fn config_in_sync(current: &Config, desired: &Config) -> bool {
    current.len() == desired.len()
        && desired
            .iter()
            .all(|(key, value)| current.get(key).is_some_and(|c| values_equal(c, value)))
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => config_in_sync(a, b),
        _ => match (scalar_text(a), scalar_text(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
