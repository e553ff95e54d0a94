//! CON text → [`Value`] (spec §4.5-§4.7). A recursive-descent parser over a
//! pre-split line table: each production returns the value it parsed plus the index
//! of the first line it did not consume, so the caller simply resumes from there.

use crate::error::{syntax_err, ConError, Result};
use crate::header::{parse_array_header, ArrayHeader, HeaderParse};
use crate::lexical::{find_unquoted, parse_number_literal, split_unquoted, unquote_token, Delimiter};
use crate::line::{split_lines, Line};
use crate::options::ParseOptions;
use crate::value::Value;

/// Parse CON text into a [`Value`] tree under `opts`.
pub fn deserialize(text: &str, opts: &ParseOptions) -> Result<Value> {
    if text.trim().is_empty() {
        return Err(ConError::EmptyInput);
    }
    let lines = split_lines(text, opts.strict)?;
    if lines.is_empty() {
        return Err(ConError::EmptyInput);
    }
    let parser = Parser {
        lines,
        opts: opts.clone(),
    };
    parser.parse_document()
}

/// Convenience wrapper matching the teacher's `decode(con: &str)` string path:
/// parse and re-serialize as compact JSON text.
pub fn decode(con: &str) -> Result<String> {
    let value = deserialize(con, &ParseOptions::default())?;
    Ok(serde_json::to_string(&value.to_json())?)
}

struct Parser<'a> {
    lines: Vec<Line<'a>>,
    opts: ParseOptions,
}

impl<'a> Parser<'a> {
    fn parse_document(&self) -> Result<Value> {
        let first = self.lines[0];
        if let Some(hp) = parse_array_header(first.content) {
            if hp.header.key.is_none() {
                let (value, next) = self.parse_array_from_header(&hp, 0, 0)?;
                self.ensure_consumed(next)?;
                return Ok(value);
            }
        }
        if self.lines.len() == 1 && find_unquoted(first.content, b':', 0).is_none() {
            let value = parse_primitive_token(first.content, first.line_number)?;
            return Ok(value);
        }
        let (pairs, next) = self.parse_object(0, 0)?;
        self.ensure_consumed(next)?;
        Ok(Value::Obj(pairs))
    }

    fn ensure_consumed(&self, next: usize) -> Result<()> {
        if next != self.lines.len() {
            let line = self.lines[next];
            return Err(syntax_err(line.line_number, "unexpected trailing content"));
        }
        Ok(())
    }

    /// Parse every field at exactly `depth`, starting at line `start`, stopping at
    /// the first line that is shallower (or at end of input).
    fn parse_object(&self, depth: usize, start: usize) -> Result<(Vec<(String, Value)>, usize)> {
        let mut pairs = Vec::new();
        let mut i = start;
        while i < self.lines.len() && self.lines[i].depth == depth {
            let line = self.lines[i];
            if let Some(hp) = parse_array_header(line.content) {
                if let Some(key) = hp.header.key.clone() {
                    let (value, next) = self.parse_array_from_header(&hp, depth, i)?;
                    pairs.push((key, value));
                    i = next;
                    continue;
                }
            }
            let (key, value, next) = self.parse_key_value_line(line, depth, i)?;
            pairs.push((key, value));
            i = next;
        }
        Ok((pairs, i))
    }

    fn parse_key_value_line(&self, line: Line<'a>, depth: usize, i: usize) -> Result<(String, Value, usize)> {
        let content = line.content;
        let colon = find_unquoted(content, b':', 0)
            .ok_or_else(|| syntax_err(line.line_number, "expected ':' in key-value line"))?;
        let key_part = content[..colon].trim();
        let key = unquote_token(key_part, line.line_number)?;
        let rest = content[colon + 1..].trim_start();
        if rest.is_empty() {
            if i + 1 < self.lines.len() && self.lines[i + 1].depth > depth {
                let (pairs, next) = self.parse_object(depth + 1, i + 1)?;
                return Ok((key, Value::Obj(pairs), next));
            }
            return Ok((key, Value::Obj(Vec::new()), i + 1));
        }
        let value = parse_primitive_token(rest, line.line_number)?;
        Ok((key, value, i + 1))
    }

    /// `hp` was parsed from `self.lines[i].content`. `depth` is the header line's own
    /// depth; any body lines it owns sit at `depth + 1`.
    fn parse_array_from_header(&self, hp: &HeaderParse, depth: usize, i: usize) -> Result<(Value, usize)> {
        let header = &hp.header;
        let line = self.lines[i];
        if let Some(tail) = &hp.inline_tail {
            let items = self.parse_inline_values(tail, header.delimiter, line.line_number)?;
            self.check_count(header, items.len())?;
            return Ok((Value::Arr(items), i + 1));
        }
        if header.count == 0 {
            return Ok((Value::Arr(Vec::new()), i + 1));
        }
        let body_depth = depth + 1;
        if let Some(fields) = &header.fields {
            let (rows, next) = self.parse_tabular_rows(body_depth, i + 1, fields, header.delimiter)?;
            self.check_count(header, rows.len())?;
            return Ok((Value::Arr(rows), next));
        }
        // Brace-less header whose first body line isn't a list item: the field
        // names are inferred from that line instead of the `{...}` segment (spec
        // §4.7's tabular dispatch also covers this header-row form).
        if i + 1 < self.lines.len()
            && self.lines[i + 1].depth == body_depth
            && !self.lines[i + 1].content.starts_with('-')
        {
            let header_row = self.lines[i + 1];
            let fields: Vec<String> = split_unquoted(header_row.content, header.delimiter.as_char() as u8)
                .into_iter()
                .map(|part| unquote_token(part.trim(), header_row.line_number))
                .collect::<Result<_>>()?;
            let (rows, next) = self.parse_tabular_rows(body_depth, i + 2, &fields, header.delimiter)?;
            self.check_count(header, rows.len())?;
            return Ok((Value::Arr(rows), next));
        }
        let (items, next) = self.parse_list_items(body_depth, i + 1)?;
        self.check_count(header, items.len())?;
        Ok((Value::Arr(items), next))
    }

    fn check_count(&self, header: &ArrayHeader, actual: usize) -> Result<()> {
        if self.opts.strict && header.count != actual {
            return Err(ConError::CountMismatch {
                expected: header.count,
                actual,
                kind: "array",
            });
        }
        Ok(())
    }

    fn parse_inline_values(&self, tail: &str, delimiter: Delimiter, line: usize) -> Result<Vec<Value>> {
        if tail.trim().is_empty() {
            return Ok(Vec::new());
        }
        split_unquoted(tail, delimiter.as_char() as u8)
            .into_iter()
            .map(|tok| parse_primitive_token(tok.trim(), line))
            .collect()
    }

    fn parse_tabular_rows(
        &self,
        depth: usize,
        start: usize,
        fields: &[String],
        delimiter: Delimiter,
    ) -> Result<(Vec<Value>, usize)> {
        let mut rows = Vec::new();
        let mut i = start;
        while i < self.lines.len() && self.lines[i].depth == depth {
            let line = self.lines[i];
            let cells = split_unquoted(line.content, delimiter.as_char() as u8);
            if cells.len() != fields.len() {
                return Err(syntax_err(
                    line.line_number,
                    format!("expected {} tabular columns, found {}", fields.len(), cells.len()),
                ));
            }
            let mut pairs = Vec::with_capacity(fields.len());
            for (field, cell) in fields.iter().zip(cells) {
                pairs.push((field.clone(), parse_primitive_token(cell.trim(), line.line_number)?));
            }
            rows.push(Value::Obj(pairs));
            i += 1;
        }
        Ok((rows, i))
    }

    fn parse_list_items(&self, depth: usize, start: usize) -> Result<(Vec<Value>, usize)> {
        let mut items = Vec::new();
        let mut i = start;
        while i < self.lines.len() && self.lines[i].depth == depth {
            let line = self.lines[i];
            if !line.content.starts_with('-') {
                break;
            }
            let rest = &line.content[1..];
            let after_dash = rest.strip_prefix(' ').unwrap_or(rest);
            let (value, next) = self.parse_list_item(after_dash, depth, i)?;
            items.push(value);
            i = next;
        }
        Ok((items, i))
    }

    /// `after_dash` is the item line's content with its `"- "` marker stripped.
    fn parse_list_item(&self, after_dash: &str, depth: usize, i: usize) -> Result<(Value, usize)> {
        let line = self.lines[i];
        if after_dash.is_empty() {
            if i + 1 < self.lines.len() && self.lines[i + 1].depth > depth {
                let (pairs, next) = self.parse_object(depth + 1, i + 1)?;
                return Ok((Value::Obj(pairs), next));
            }
            return Ok((Value::Obj(Vec::new()), i + 1));
        }
        if let Some(hp) = parse_array_header(after_dash) {
            if let Some(key) = hp.header.key.clone() {
                let (first_val, next) = self.parse_array_from_header(&hp, depth + 1, i)?;
                return self.parse_list_item_object_continuation(key, first_val, depth, next);
            }
            let (value, next) = self.parse_array_from_header(&hp, depth, i)?;
            return Ok((value, next));
        }
        if let Some(colon) = find_unquoted(after_dash, b':', 0) {
            let key_part = after_dash[..colon].trim();
            let key = unquote_token(key_part, line.line_number)?;
            let rest = after_dash[colon + 1..].trim_start();
            let (first_val, next) = if rest.is_empty() {
                if i + 1 < self.lines.len() && self.lines[i + 1].depth > depth + 1 {
                    let (pairs, next) = self.parse_object(depth + 2, i + 1)?;
                    (Value::Obj(pairs), next)
                } else {
                    (Value::Obj(Vec::new()), i + 1)
                }
            } else {
                (parse_primitive_token(rest, line.line_number)?, i + 1)
            };
            return self.parse_list_item_object_continuation(key, first_val, depth, next);
        }
        Ok((parse_primitive_token(after_dash, line.line_number)?, i + 1))
    }

    /// Gather any sibling fields of a list item's first key, which live at
    /// `depth + 1` — the same depth the first key's own nested content (if any)
    /// sits one level below.
    fn parse_list_item_object_continuation(
        &self,
        first_key: String,
        first_val: Value,
        depth: usize,
        next: usize,
    ) -> Result<(Value, usize)> {
        let mut pairs = vec![(first_key, first_val)];
        if next < self.lines.len() && self.lines[next].depth == depth + 1 {
            let (rest_pairs, after) = self.parse_object(depth + 1, next)?;
            pairs.extend(rest_pairs);
            return Ok((Value::Obj(pairs), after));
        }
        Ok((Value::Obj(pairs), next))
    }
}

/// Parse a single primitive token: quoted string, `null`/`true`/`false`, a numeric
/// literal, or (falling through) an unquoted string.
fn parse_primitive_token(tok: &str, line: usize) -> Result<Value> {
    let tok = tok.trim();
    if tok.is_empty() {
        return Ok(Value::Str(String::new()));
    }
    if tok.starts_with('"') {
        return Ok(Value::Str(unquote_token(tok, line)?));
    }
    match tok {
        "null" => return Ok(Value::Null),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {}
    }
    if let Some(n) = parse_number_literal(tok) {
        return Ok(Value::Num(n));
    }
    Ok(Value::Str(tok.to_string()))
}
