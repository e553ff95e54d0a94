//! Lexical primitives shared by the emitter and parser: string escaping, quote-aware
//! scanning, and literal classification (spec §4.1).

use crate::error::{syntax_err, Result};

/// The single character that separates primitive values inside a header's tail,
/// a tabular row, or a field list. Defaults to comma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// The character recorded inside the bracket segment of a header when this
    /// delimiter is active and non-default. `None` for the default comma.
    pub fn hint(self) -> Option<char> {
        match self {
            Delimiter::Comma => None,
            Delimiter::Tab => Some('\t'),
            Delimiter::Pipe => Some('|'),
        }
    }

    pub fn from_hint(c: char) -> Option<Delimiter> {
        match c {
            '\t' => Some(Delimiter::Tab),
            '|' => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Comma
    }
}

/// Where a string value sits determines which characters force quoting in addition
/// to the five that always do. Outside of an array/tabular/field-list body there is
/// no "active delimiter" at all — only the colon (a document key-value separator)
/// matters there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteContext {
    /// A key-value value, or a bare root/list-item primitive.
    Document,
    /// An inline array value, tabular cell, or field-list entry under `delimiter`.
    Delimited(Delimiter),
}

/// Escape exactly `\\`, `"`, `\n`, `\r`, `\t`, in that substitution order.
pub fn escape_string(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
}

/// Unescape the same five sequences. Any other `\X`, or a trailing backslash, is a
/// syntax error — the decoder never silently passes through an unknown escape.
pub fn unescape_string(s: &str, line: usize) -> Result<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                return Err(syntax_err(line, format!("unknown escape sequence \\{other}")))
            }
            None => return Err(syntax_err(line, "trailing backslash in quoted string")),
        }
    }
    Ok(out)
}

/// Find the index of the closing `"` of a quoted token, starting just after the
/// opening quote. A backslash consumes the next byte without inspecting it.
pub fn find_closing_quote(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Find the first occurrence of `target` (an ASCII byte) outside any quoted span.
pub fn find_unquoted(s: &str, target: u8, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = start;
    let mut in_quotes = false;
    while i < bytes.len() {
        let b = bytes[i];
        if in_quotes {
            match b {
                b'\\' => i += 2,
                b'"' => {
                    in_quotes = false;
                    i += 1;
                }
                _ => i += 1,
            }
            continue;
        }
        if b == b'"' {
            in_quotes = true;
            i += 1;
            continue;
        }
        if b == target {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Split `s` on `delim`, honoring quoted spans, returning each raw (not yet
/// unescaped) segment.
pub fn split_unquoted(s: &str, delim: u8) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    loop {
        match find_unquoted(s, delim, start) {
            Some(pos) => {
                parts.push(&s[start..pos]);
                start = pos + 1;
            }
            None => {
                parts.push(&s[start..]);
                break;
            }
        }
    }
    parts
}

pub fn is_bool_or_null_literal(s: &str) -> bool {
    matches!(s, "true" | "false" | "null")
}

/// Emitter-side numeric-like test used to force quoting: matches the full string
/// against `-?\d+(\.\d+)?([eE][+-]?\d+)?`. Bare leading-zero integers (`"007"`)
/// already satisfy `\d+` and are therefore numeric-like too, forcing a quote.
pub fn looks_numeric_for_quoting(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut i = if bytes[0] == b'-' { 1 } else { 0 };
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return false;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == frac_start {
            return false;
        }
        i = j;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == exp_start {
            return false;
        }
        i = j;
    }
    i == bytes.len()
}

/// Parser-side numeric literal test: the token must match the same grammar as
/// [`looks_numeric_for_quoting`] AND must not have a leading zero followed by
/// another digit (except the single token `"0"`) — ambiguous leading-zero integers
/// are rejected here so they round-trip as strings instead of silently losing
/// their leading zeros.
pub fn parse_number_literal(s: &str) -> Option<f64> {
    if !looks_numeric_for_quoting(s) {
        return None;
    }
    let bytes = s.as_bytes();
    let start = if bytes[0] == b'-' { 1 } else { 0 };
    if start < bytes.len() && bytes[start] == b'0' && bytes.get(start + 1).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    s.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// A key may be written unquoted iff it matches `[A-Za-z_][A-Za-z0-9_.]*`.
pub fn is_valid_unquoted_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// A string value may be written unquoted iff it is non-empty, equals its trimmed
/// form, isn't a bool/null/numeric-like literal, contains none of the always-forbidden
/// characters, doesn't start with `-`, and (when a delimiter is active) doesn't
/// contain that delimiter.
pub fn is_safe_unquoted(s: &str, ctx: QuoteContext) -> bool {
    if s.is_empty() {
        return false;
    }
    if s != s.trim() {
        return false;
    }
    if is_bool_or_null_literal(s) {
        return false;
    }
    if looks_numeric_for_quoting(s) {
        return false;
    }
    if s.starts_with('-') {
        return false;
    }
    const ALWAYS_FORBIDDEN: [char; 10] = [':', '"', '\\', '[', ']', '{', '}', '\n', '\r', '\t'];
    if s.contains(|c| ALWAYS_FORBIDDEN.contains(&c)) {
        return false;
    }
    if let QuoteContext::Delimited(delim) = ctx {
        if s.contains(delim.as_char()) {
            return false;
        }
    }
    true
}

/// Parse a quoted or unquoted token (already trimmed by the caller if needed) into
/// its unescaped text, or fail if the quoting is malformed.
pub fn unquote_token(s: &str, line: usize) -> Result<String> {
    if !s.starts_with('"') {
        return Ok(s.to_string());
    }
    let end = find_closing_quote(s, 1).ok_or_else(|| syntax_err(line, "unterminated quoted token"))?;
    if end != s.len() - 1 {
        return Err(syntax_err(line, "trailing characters after closing quote"));
    }
    unescape_string(&s[1..end], line)
}
