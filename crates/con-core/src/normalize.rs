//! Normalization: the deterministic boundary between `serde_json::Value` and the
//! emitter's own [`Value`] (spec §3).
//!
//! - `-0.0` folds to `0.0`.
//! - Non-finite numbers (NaN, +/-Infinity) lower to `Null`. The standard `serde_json`
//!   text parser never produces one, but a tree built through `serde_json::json!` or
//!   `Number::from_f64` can still carry one through to us, so the check stays live
//!   rather than relying on the parser boundary alone.
//! - A recursion depth cap stands in for cycle detection. `Value`'s `Arr`/`Obj`
//!   variants own their children by value, so a true reference cycle can't be built
//!   in safe Rust; a depth past [`MAX_DEPTH`] is the closest observable proxy and is
//!   what actually raises `ConError::CycleDetected` in this crate.

use crate::error::{ConError, Result};
use crate::value::Value;
use serde_json::{Map, Number};

/// Recursion ceiling for [`normalize`]. Chosen well above any realistic document
/// depth; existing only so pathological or generated input fails cleanly instead of
/// blowing the call stack.
const MAX_DEPTH: usize = 500;

/// Convert a parsed JSON tree into the crate's own [`Value`] representation.
pub fn normalize(input: serde_json::Value) -> Result<Value> {
    normalize_at(&input, 0)
}

fn normalize_at(v: &serde_json::Value, depth: usize) -> Result<Value> {
    if depth > MAX_DEPTH {
        return Err(ConError::CycleDetected);
    }
    Ok(match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => normalize_number(n),
        serde_json::Value::String(s) => Value::Str(s.clone()),
        serde_json::Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(normalize_at(item, depth + 1)?);
            }
            Value::Arr(out)
        }
        serde_json::Value::Object(map) => Value::Obj(normalize_map(map, depth + 1)?),
    })
}

fn normalize_map(map: &Map<String, serde_json::Value>, depth: usize) -> Result<Vec<(String, Value)>> {
    let mut out = Vec::with_capacity(map.len());
    for (k, v) in map {
        out.push((k.clone(), normalize_at(v, depth)?));
    }
    Ok(out)
}

/// `Number::as_f64` is total for every number `serde_json` can parse from text, but
/// a value constructed programmatically (`Number::from_f64(f64::NAN)` would itself
/// fail, yet `f64::INFINITY` round-trips through some `Deserialize` impls) can still
/// reach us non-finite.
fn normalize_number(n: &Number) -> Value {
    let f = n.as_f64().unwrap_or(f64::NAN);
    if !f.is_finite() {
        return Value::Null;
    }
    Value::Num(if f == 0.0 { 0.0 } else { f })
}
