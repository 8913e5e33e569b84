//! # Fix Adapter
//!
//! Normalizes values that have no native wire representation before they
//! are encoded, and restores them after decoding.
//!
//! - Filesystem paths are sent as their string form. The path *type* is not
//!   restored, only its value.
//! - Null values are wrapped into a sentinel mapping, so that a null is never
//!   confused with an absent field nor with the string `"null"`.
//! - Caller mappings that would read back as a sentinel (or as an escape
//!   wrapper) are wrapped under [`ESCAPED_KEY`] and unwrapped on decoding.

use crate::codec::Envelope;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Key of the single-entry mapping standing in for a null value.
pub const NONE_SENTINEL_KEY: &str = "__nightskycam_none__";

/// Key of the single-entry mapping wrapping a caller mapping that is
/// shaped like a sentinel.
pub const ESCAPED_KEY: &str = "__nightskycam_escaped__";

/// A value as handed over by callers, before fixing.
#[derive(Debug, Clone, PartialEq)]
pub enum FixValue {
    /// Any JSON-compatible value.
    Value(Value),
    /// A filesystem path.
    Path(PathBuf),
}

impl From<Value> for FixValue {
    fn from(value: Value) -> Self {
        FixValue::Value(value)
    }
}

impl From<&Value> for FixValue {
    fn from(value: &Value) -> Self {
        FixValue::Value(value.clone())
    }
}

impl From<PathBuf> for FixValue {
    fn from(path: PathBuf) -> Self {
        FixValue::Path(path)
    }
}

impl From<&Path> for FixValue {
    fn from(path: &Path) -> Self {
        FixValue::Path(path.to_path_buf())
    }
}

fn none_sentinel() -> Value {
    let mut sentinel = Map::new();
    sentinel.insert(NONE_SENTINEL_KEY.to_string(), Value::Bool(true));
    Value::Object(sentinel)
}

fn is_none_sentinel(map: &Map<String, Value>) -> bool {
    map.len() == 1 && map.get(NONE_SENTINEL_KEY) == Some(&Value::Bool(true))
}

// any single-entry mapping keyed by ESCAPED_KEY, whatever its value
fn is_escape_shaped(map: &Map<String, Value>) -> bool {
    map.len() == 1 && map.contains_key(ESCAPED_KEY)
}

fn fix_value(value: Value) -> Value {
    match value {
        Value::Null => none_sentinel(),
        Value::Array(items) => Value::Array(items.into_iter().map(fix_value).collect()),
        Value::Object(map) => {
            let escape = is_none_sentinel(&map) || is_escape_shaped(&map);
            let fixed: Map<String, Value> =
                map.into_iter().map(|(k, v)| (k, fix_value(v))).collect();
            if escape {
                let mut wrapper = Map::new();
                wrapper.insert(ESCAPED_KEY.to_string(), Value::Object(fixed));
                Value::Object(wrapper)
            } else {
                Value::Object(fixed)
            }
        }
        other => other,
    }
}

fn unfix_map(map: Map<String, Value>) -> Value {
    Value::Object(map.into_iter().map(|(k, v)| (k, unfix_value(v))).collect())
}

fn unfix_value(value: Value) -> Value {
    match value {
        Value::Object(map) if is_none_sentinel(&map) => Value::Null,
        Value::Object(mut map) if is_escape_shaped(&map) => match map.remove(ESCAPED_KEY) {
            Some(Value::Object(inner)) => unfix_map(inner),
            Some(other) => {
                map.insert(ESCAPED_KEY.to_string(), other);
                unfix_map(map)
            }
            None => unfix_map(map),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(unfix_value).collect()),
        Value::Object(map) => unfix_map(map),
        other => other,
    }
}

/// Returns a wire-compatible copy of `d`: paths become strings and nulls
/// (at any depth) become sentinels.
///
/// Counterpart: [`deserialize_fix_dict`].
pub fn serialize_fix_dict<I, K, V>(d: I) -> Envelope
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FixValue>,
{
    d.into_iter()
        .map(|(key, value)| {
            let fixed = match value.into() {
                FixValue::Path(path) => Value::String(path.to_string_lossy().into_owned()),
                FixValue::Value(value) => fix_value(value),
            };
            (key.into(), fixed)
        })
        .collect()
}

/// Restores the nulls wrapped by [`serialize_fix_dict`].
pub fn deserialize_fix_dict(d: &Envelope) -> Envelope {
    d.iter()
        .map(|(key, value)| (key.clone(), unfix_value(value.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_fix_round_trip() {
        let path = "/path/to/file";
        let din: Vec<(&str, FixValue)> = vec![
            ("A", json!(1).into()),
            ("B", PathBuf::from(path).into()),
            ("C", Value::Null.into()),
        ];

        let dfixed = serialize_fix_dict(din);
        assert_ne!(dfixed["C"], Value::Null);
        assert_eq!(dfixed["B"], json!(path));

        let dout = deserialize_fix_dict(&dfixed);
        assert_eq!(dout["A"], json!(1));
        assert_eq!(dout["B"], json!(path));
        assert_eq!(dout["C"], Value::Null);
    }

    #[test]
    fn test_nested_nulls_are_wrapped() {
        let din = json!({"entries": {"a": null, "b": [null, 1]}});
        let Value::Object(din) = din else { unreachable!() };

        let dfixed = serialize_fix_dict(&din);
        let text = Value::Object(dfixed.clone()).to_string();
        assert!(!text.contains("null"));

        assert_eq!(deserialize_fix_dict(&dfixed), din);
    }

    #[test]
    fn test_null_distinct_from_null_string() {
        let din = json!({"real": null, "text": "null", "other": {"x": true}});
        let Value::Object(din) = din else { unreachable!() };

        let dout = deserialize_fix_dict(&serialize_fix_dict(&din));
        assert_eq!(dout["real"], Value::Null);
        assert_eq!(dout["text"], json!("null"));
        assert_eq!(dout["other"], json!({"x": true}));
    }

    #[test]
    fn test_path_reference() {
        let path = Path::new("/var/nightskycam/pictures");
        let dfixed = serialize_fix_dict([("folder", path)]);
        assert_eq!(dfixed["folder"], json!("/var/nightskycam/pictures"));
    }

    #[test]
    fn test_sentinel_shaped_data_survives() {
        let din = json!({
            "opt": {"__nightskycam_none__": true},
            "wrapped": {"__nightskycam_escaped__": {"__nightskycam_none__": true}},
            "odd": {"__nightskycam_escaped__": 3},
            "list": [{"__nightskycam_none__": true}, null],
        });
        let Value::Object(din) = din else { unreachable!() };

        let dfixed = serialize_fix_dict(&din);
        assert_ne!(dfixed["opt"], din["opt"]);

        assert_eq!(deserialize_fix_dict(&dfixed), din);
    }

    #[test]
    fn test_sentinel_is_not_a_caller_value() {
        let dfixed = serialize_fix_dict([("opt", Value::Null)]);
        assert_eq!(dfixed["opt"], json!({"__nightskycam_none__": true}));
    }

    fn has_null(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Array(items) => items.iter().any(has_null),
            Value::Object(map) => map.values().any(has_null),
            _ => false,
        }
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z/ ]{0,10}".prop_map(Value::from),
            Just(json!({"__nightskycam_none__": true})),
        ];
        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                proptest::collection::btree_map("[a-z]{1,6}", inner.clone(), 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
                inner.prop_map(|v| json!({"__nightskycam_escaped__": v})),
            ]
        })
    }

    fn arb_fix_value() -> impl Strategy<Value = FixValue> {
        prop_oneof![
            arb_value().prop_map(FixValue::Value),
            "(/[a-z0-9_.]{1,8}){1,4}".prop_map(|p| FixValue::Path(PathBuf::from(p))),
        ]
    }

    proptest! {
        #[test]
        fn prop_fix_round_trip(din in proptest::collection::btree_map("[a-zA-Z_]{1,8}", arb_fix_value(), 0..6)) {
            let expected: Envelope = din
                .iter()
                .map(|(key, value)| {
                    let value = match value {
                        FixValue::Value(value) => value.clone(),
                        FixValue::Path(path) => Value::from(path.to_string_lossy().into_owned()),
                    };
                    (key.clone(), value)
                })
                .collect();

            let dfixed = serialize_fix_dict(din);
            prop_assert!(dfixed.values().all(|value| !has_null(value)));
            prop_assert_eq!(deserialize_fix_dict(&dfixed), expected);
        }
    }
}
