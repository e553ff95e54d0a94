//! The logical CON value: a closed, six-variant sum that mirrors the JSON data model.
//!
//! `Obj` is a `Vec<(String, Value)>` rather than a map so that insertion order is
//! preserved without an extra dependency (no `indexmap`, no `BTreeMap` re-sorting).
//! All per-variant behavior elsewhere in this crate (classify, emit, parse-into) is
//! exhaustive pattern matching over this type — there is no open-world extension.

/// A CON/JSON value. Numbers are always `f64`; normalization (see [`crate::normalize`])
/// is responsible for folding `-0`, rejecting non-finite floats, and lowering
/// out-of-range integers before a `Value` is handed to the emitter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Arr(Vec<Value>),
    Obj(Vec<(String, Value)>),
}

impl Value {
    /// True for the four scalar variants (null, bool, number, string).
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Arr(_) | Value::Obj(_))
    }

    pub fn as_arr(&self) -> Option<&[Value]> {
        match self {
            Value::Arr(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_obj(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Obj(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Look up a field by key in an `Obj`. Linear scan — objects here are small and
    /// ordering, not lookup speed, is what matters.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_obj()?.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Convert back to `serde_json::Value`, the host/interchange boundary type.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Num(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Arr(items) => serde_json::Value::Array(items.iter().map(Value::to_json).collect()),
            Value::Obj(pairs) => {
                let mut map = serde_json::Map::new();
                for (k, v) in pairs {
                    map.insert(k.clone(), v.to_json());
                }
                serde_json::Value::Object(map)
            }
        }
    }
}
