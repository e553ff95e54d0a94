//! Value → CON text (spec §4.2-§4.4). Mirrors the recursive, shape-dispatching
//! structure of the parser: one function per production (object fields, array
//! bodies by shape, list items, primitives).

use crate::error::{ConError, Result};
use crate::header::format_header;
use crate::lexical::{escape_string, is_safe_unquoted, is_valid_unquoted_key, Delimiter, QuoteContext};
use crate::options::{EmitOptions, INDENT_SIZE};
use crate::shape::{classify, tabular_fields, ArrayShape};
use crate::value::Value;

/// Serialize a normalized [`Value`] tree to CON text under `opts`.
pub fn serialize(value: &Value, opts: &EmitOptions) -> Result<String> {
    let mut out = String::new();
    emit_root(value, opts, &mut out)?;
    Ok(out)
}

/// Convenience wrapper matching the teacher's `encode(json: &str)` string path:
/// parse, normalize, and serialize with default options.
pub fn encode(json: &str) -> Result<String> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    let value = crate::normalize::normalize(parsed)?;
    serialize(&value, &EmitOptions::default())
}

fn emit_root(value: &Value, opts: &EmitOptions, out: &mut String) -> Result<()> {
    match value {
        Value::Obj(pairs) => emit_object_fields(pairs, 0, opts, out),
        Value::Arr(items) => emit_array(None, items, 0, opts, out),
        primitive => {
            emit_primitive(primitive, QuoteContext::Document, out);
            Ok(())
        }
    }
}

fn emit_object_fields(
    pairs: &[(String, Value)],
    depth: usize,
    opts: &EmitOptions,
    out: &mut String,
) -> Result<()> {
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&make_indent(depth));
        emit_object_field(key, value, depth, opts, out)?;
    }
    Ok(())
}

fn emit_object_field(
    key: &str,
    value: &Value,
    depth: usize,
    opts: &EmitOptions,
    out: &mut String,
) -> Result<()> {
    match value {
        Value::Arr(items) => emit_array_inline(Some(key), items, depth, opts, out),
        Value::Obj(child) => {
            out.push_str(&encode_key(key));
            out.push(':');
            if !child.is_empty() {
                out.push('\n');
                emit_object_fields(child, depth + 1, opts, out)?;
            }
            Ok(())
        }
        primitive => {
            out.push_str(&encode_key(key));
            out.push_str(": ");
            emit_primitive(primitive, QuoteContext::Document, out);
            Ok(())
        }
    }
}

fn emit_array(key: Option<&str>, items: &[Value], depth: usize, opts: &EmitOptions, out: &mut String) -> Result<()> {
    out.push_str(&make_indent(depth));
    emit_array_inline(key, items, depth, opts, out)
}

/// Write an array header plus body, assuming the caller already wrote the line's
/// leading indent (or a `"- "` item marker occupying the same column).
fn emit_array_inline(
    key: Option<&str>,
    items: &[Value],
    depth: usize,
    opts: &EmitOptions,
    out: &mut String,
) -> Result<()> {
    let shape = effective_shape(items, opts);
    let delimiter = opts.delimiter;
    assert_array_count(items.len(), items.len(), opts.strict_arrays)?;
    match shape {
        ArrayShape::Empty => {
            out.push_str(&format_header(key, 0, delimiter, None, false));
        }
        ArrayShape::InlinePrimitive => {
            out.push_str(&format_header(key, items.len(), delimiter, None, false));
            out.push(' ');
            emit_inline_values(items, delimiter, out);
        }
        ArrayShape::Tabular => {
            let fields = tabular_fields(items).expect("classified as tabular");
            out.push_str(&format_header(key, items.len(), delimiter, Some(&fields), false));
            for item in items {
                out.push('\n');
                out.push_str(&make_indent(depth + 1));
                emit_tabular_row(item, &fields, delimiter, out);
            }
        }
        ArrayShape::ListOfPrimArrays | ArrayShape::MixedList => {
            out.push_str(&format_header(key, items.len(), delimiter, None, false));
            for item in items {
                out.push('\n');
                emit_list_item(item, depth + 1, opts, out)?;
            }
        }
    }
    Ok(())
}

/// Downgrade a tabular-eligible array below `opts.min_tabular_length` to the
/// mixed-list form instead (Open Question: honored, see DESIGN.md).
fn effective_shape(items: &[Value], opts: &EmitOptions) -> ArrayShape {
    let shape = classify(items);
    if shape == ArrayShape::Tabular && items.len() < opts.min_tabular_length {
        return ArrayShape::MixedList;
    }
    shape
}

/// Strict-mode counterpart to the parser's `check_count`: under `strict_arrays`,
/// asserts the count an array header is about to declare matches the body
/// length it's about to emit. The core always calls this with matching counts
/// since it derives both from the same `items.len()`; it exists so a caller
/// who builds a header's declared count by hand gets the same validation
/// `deserialize`'s strict mode applies on the way back in.
fn assert_array_count(declared: usize, actual: usize, strict_arrays: bool) -> Result<()> {
    if strict_arrays && declared != actual {
        return Err(ConError::CountMismatch {
            expected: declared,
            actual,
            kind: "array",
        });
    }
    Ok(())
}

fn emit_inline_values(items: &[Value], delimiter: Delimiter, out: &mut String) {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push(delimiter.as_char());
        }
        emit_primitive(item, QuoteContext::Delimited(delimiter), out);
    }
}

fn emit_tabular_row(item: &Value, fields: &[String], delimiter: Delimiter, out: &mut String) {
    let obj = item.as_obj().unwrap_or(&[]);
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(delimiter.as_char());
        }
        let value = obj
            .iter()
            .find(|(k, _)| k == field)
            .map(|(_, v)| v)
            .expect("tabular row missing a column validated at classification");
        emit_primitive(value, QuoteContext::Delimited(delimiter), out);
    }
}

fn emit_list_item(item: &Value, depth: usize, opts: &EmitOptions, out: &mut String) -> Result<()> {
    match item {
        Value::Obj(pairs) => emit_list_item_object(pairs, depth, opts, out),
        Value::Arr(items) => {
            out.push_str(&make_indent(depth));
            out.push_str("- ");
            emit_array_inline(None, items, depth, opts, out)
        }
        primitive => {
            out.push_str(&make_indent(depth));
            out.push_str("- ");
            emit_primitive(primitive, QuoteContext::Document, out);
            Ok(())
        }
    }
}

/// An object list item puts its first field on the same line as the `"- "` marker
/// and the remaining fields at `depth + 1`, so continuation fields line up under the
/// item exactly as a nested object's fields would.
fn emit_list_item_object(
    pairs: &[(String, Value)],
    depth: usize,
    opts: &EmitOptions,
    out: &mut String,
) -> Result<()> {
    out.push_str(&make_indent(depth));
    out.push_str("- ");
    let Some((first_key, first_val)) = pairs.first() else {
        return Ok(());
    };
    // The first field shares the item's own depth for its key, but any content
    // nested under it lines up one level deeper than the item's other fields do
    // (those live at `depth + 1`, filling the column the `"- "` marker ate).
    emit_object_field(first_key, first_val, depth + 1, opts, out)?;
    if pairs.len() > 1 {
        out.push('\n');
        emit_object_fields(&pairs[1..], depth + 1, opts, out)?;
    }
    Ok(())
}

fn emit_primitive(value: &Value, ctx: QuoteContext, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Num(f) => out.push_str(&format_number(*f)),
        Value::Str(s) => encode_string(s, ctx, out),
        Value::Arr(_) | Value::Obj(_) => unreachable!("emit_primitive called on a container"),
    }
}

fn encode_string(s: &str, ctx: QuoteContext, out: &mut String) {
    if is_safe_unquoted(s, ctx) {
        out.push_str(s);
    } else {
        out.push('"');
        escape_string(s, out);
        out.push('"');
    }
}

/// Render a key unquoted when it matches the identifier grammar, quoted otherwise.
pub fn encode_key(key: &str) -> String {
    if is_valid_unquoted_key(key) {
        key.to_string()
    } else {
        let mut s = String::from("\"");
        escape_string(key, &mut s);
        s.push('"');
        s
    }
}

/// Render `f` with no exponent and no superfluous trailing zeros. `-0.0` is folded
/// to `0.0` by normalization before this is ever called.
pub fn format_number(f: f64) -> String {
    if f == 0.0 {
        "0".to_string()
    } else {
        format!("{f}")
    }
}

fn make_indent(depth: usize) -> String {
    " ".repeat(depth * INDENT_SIZE)
}
