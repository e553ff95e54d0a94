//! Array shape classification (spec §4.3). Shared by the emitter (to choose an
//! encoding) and, implicitly, by the header parser (recognizing the shapes a header
//! can describe).

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayShape {
    Empty,
    InlinePrimitive,
    Tabular,
    ListOfPrimArrays,
    MixedList,
}

/// Classify an array per §4.3. Ties break in textual order: tabular is preferred
/// over mixed-list whenever it is eligible.
pub fn classify(arr: &[Value]) -> ArrayShape {
    if arr.is_empty() {
        return ArrayShape::Empty;
    }
    if arr.iter().all(Value::is_primitive) {
        return ArrayShape::InlinePrimitive;
    }
    if tabular_fields(arr).is_some() {
        return ArrayShape::Tabular;
    }
    if arr
        .iter()
        .all(|v| matches!(v, Value::Arr(inner) if inner.iter().all(Value::is_primitive)))
    {
        return ArrayShape::ListOfPrimArrays;
    }
    ArrayShape::MixedList
}

/// If `arr` is tabular-eligible (every element an object, all sharing the first
/// element's key set with primitive-only values), return the column order (the
/// first element's insertion order).
pub fn tabular_fields(arr: &[Value]) -> Option<Vec<String>> {
    let first = match arr.first()? {
        Value::Obj(pairs) => pairs,
        _ => return None,
    };
    if first.is_empty() {
        return None;
    }
    let fields: Vec<String> = first.iter().map(|(k, _)| k.clone()).collect();
    if first.iter().any(|(_, v)| !v.is_primitive()) {
        return None;
    }
    for item in &arr[1..] {
        let obj = match item {
            Value::Obj(pairs) => pairs,
            _ => return None,
        };
        if obj.len() != fields.len() {
            return None;
        }
        for field in &fields {
            match obj.iter().find(|(k, _)| k == field) {
                Some((_, v)) if v.is_primitive() => {}
                _ => return None,
            }
        }
    }
    Some(fields)
}
