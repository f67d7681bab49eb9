//! Total normalization of heterogeneous remote responses.
//!
//! The remote side may answer with a native array, a native object, a
//! JSON-encoded string, or any of those wrapped in an envelope object
//! (`{"result": ...}`, `{"data": ...}`, shape-specific keys). Every routine
//! here is total: parse errors and unexpected shapes collapse to the
//! caller's default instead of propagating.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::warn;

/// Wrapper keys searched, in order, for array-shaped responses.
const ARRAY_KEYS: &[&str] = &["result", "data", "jobs", "items"];
/// Wrapper keys searched, in order, for object-shaped responses.
const OBJECT_KEYS: &[&str] = &["result", "data", "item"];
/// Wrapper keys searched, in order, for settings responses.
const SETTINGS_KEYS: &[&str] = &["settings", "data", "result"];
/// Wrapper keys searched, in order, for string-array responses.
const STRING_ARRAY_KEYS: &[&str] = &["result", "data", "items"];

/// Parse JSON strings (swallowing parse errors), then unwrap the first
/// matching envelope key. `None` means the payload was null or unparseable.
fn coerce(raw: Value, candidates: &[&str]) -> Option<Value> {
    let value = match raw {
        Value::Null => return None,
        Value::String(text) => serde_json::from_str(&text).ok()?,
        other => other,
    };
    if let Value::Object(ref map) = value {
        for key in candidates {
            if let Some(inner) = map.get(*key) {
                return Some(inner.clone());
            }
        }
    }
    Some(value)
}

/// Normalize an array-shaped response to its elements. Defaults to empty.
pub fn normalize_array(raw: Value) -> Vec<Value> {
    match coerce(raw, ARRAY_KEYS) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

/// Normalize an object-shaped response. Defaults to `None`.
pub fn normalize_object(raw: Value) -> Option<Value> {
    coerce(raw, OBJECT_KEYS).filter(Value::is_object)
}

/// Normalize a settings response. Defaults to `{"closeBehavior": "tray"}`.
pub fn normalize_settings(raw: Value) -> Value {
    match coerce(raw, SETTINGS_KEYS) {
        Some(value) if value.is_object() => value,
        _ => json!({"closeBehavior": "tray"}),
    }
}

/// Normalize a string-array response, dropping non-string elements.
pub fn normalize_string_array(raw: Value) -> Vec<String> {
    match coerce(raw, STRING_ARRAY_KEYS) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Normalize a bare string response. Defaults to empty.
pub fn normalize_string(raw: Value) -> String {
    match raw {
        Value::String(text) => text,
        _ => String::new(),
    }
}

/// Loose truthiness for flag responses, matching the original client.
pub fn normalize_bool(raw: Value) -> bool {
    match raw {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
        Value::Null => false,
    }
}

/// Decode one normalized object into `T`, absorbing mismatches to `None`.
pub fn decode_item<T: DeserializeOwned>(raw: Value) -> Option<T> {
    let value = normalize_object(raw)?;
    match serde_json::from_value(value) {
        Ok(item) => Some(item),
        Err(e) => {
            warn!("dropping malformed item in remote response: {}", e);
            None
        }
    }
}

/// Decode a normalized array element-wise, dropping malformed elements.
pub fn decode_items<T: DeserializeOwned>(raw: Value) -> Vec<T> {
    normalize_array(raw)
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("dropping malformed element in remote response: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_passthrough() {
        assert_eq!(normalize_array(json!([1, 2])), vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_array_from_json_string() {
        assert_eq!(normalize_array(json!("[1,2]")), vec![json!(1), json!(2)]);
        assert!(normalize_array(json!("not json")).is_empty());
    }

    #[test]
    fn test_array_from_envelope() {
        assert_eq!(normalize_array(json!({"jobs": [1]})), vec![json!(1)]);
        assert_eq!(normalize_array(json!({"result": [2]})), vec![json!(2)]);
        // `result` wins over later candidates.
        assert_eq!(
            normalize_array(json!({"result": [1], "jobs": [2]})),
            vec![json!(1)]
        );
        assert!(normalize_array(json!({"other": [1]})).is_empty());
    }

    #[test]
    fn test_array_from_garbage() {
        assert!(normalize_array(json!(null)).is_empty());
        assert!(normalize_array(json!(42)).is_empty());
    }

    #[test]
    fn test_object_unwraps_envelope() {
        let value = normalize_object(json!({"item": {"id": "a"}})).unwrap();
        assert_eq!(value["id"], "a");
        let value = normalize_object(json!({"id": "b"})).unwrap();
        assert_eq!(value["id"], "b");
    }

    #[test]
    fn test_object_from_json_string() {
        let value = normalize_object(json!("{\"id\":\"c\"}")).unwrap();
        assert_eq!(value["id"], "c");
        assert!(normalize_object(json!("{broken")).is_none());
    }

    #[test]
    fn test_object_rejects_non_objects() {
        assert!(normalize_object(json!(null)).is_none());
        assert!(normalize_object(json!("5")).is_none());
        assert!(normalize_object(json!([1])).is_none());
    }

    #[test]
    fn test_settings_default() {
        assert_eq!(normalize_settings(json!(null))["closeBehavior"], "tray");
        assert_eq!(normalize_settings(json!("oops"))["closeBehavior"], "tray");
    }

    #[test]
    fn test_settings_unwraps_settings_key_first() {
        let value = normalize_settings(json!({"settings": {"closeBehavior": "exit"}}));
        assert_eq!(value["closeBehavior"], "exit");
    }

    #[test]
    fn test_string_array_filters_non_strings() {
        assert_eq!(
            normalize_string_array(json!(["a", 1, "b", null])),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn test_bool_truthiness() {
        assert!(normalize_bool(json!(true)));
        assert!(normalize_bool(json!(1)));
        assert!(normalize_bool(json!("yes")));
        assert!(!normalize_bool(json!("")));
        assert!(!normalize_bool(json!(0)));
        assert!(!normalize_bool(json!(null)));
    }

    #[test]
    fn test_decode_items_drops_malformed_elements() {
        #[derive(serde::Deserialize)]
        struct Row {
            #[allow(dead_code)]
            n: u32,
        }
        let rows: Vec<Row> = decode_items(json!([{"n": 1}, {"n": "x"}, {"n": 3}]));
        assert_eq!(rows.len(), 2);
    }
}
