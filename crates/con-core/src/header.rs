//! The array header grammar (spec §4.4, §4.6): `[key]«[[#]N[delim-hint]]»[{f1«delim»f2…}]:`.
//! Shared by the emitter (building a header string) and the parser (recognizing and
//! decomposing one).

use crate::lexical::{find_closing_quote, find_unquoted, split_unquoted, unquote_token, Delimiter};

/// A decoded array header, plus any inline tail text found after its colon.
#[derive(Debug, Clone)]
pub struct ArrayHeader {
    pub key: Option<String>,
    pub count: usize,
    pub delimiter: Delimiter,
    pub fields: Option<Vec<String>>,
    pub has_count_marker: bool,
}

#[derive(Debug, Clone)]
pub struct HeaderParse {
    pub header: ArrayHeader,
    pub inline_tail: Option<String>,
}

/// Build the header line text (without key) for an array of `count` elements.
/// `has_count_marker` is always `false` along the core's own emit path (spec §4.4:
/// "fixed `false` in the core default"); it is threaded through so a hand-built
/// header can still express the `#N` form if a caller wants to.
pub fn format_header(
    key: Option<&str>,
    count: usize,
    delimiter: Delimiter,
    fields: Option<&[String]>,
    has_count_marker: bool,
) -> String {
    let mut s = String::new();
    if let Some(k) = key {
        s.push_str(&crate::emitter::encode_key(k));
    }
    s.push('[');
    if has_count_marker {
        s.push('#');
    }
    s.push_str(&count.to_string());
    if let Some(hint) = delimiter.hint() {
        s.push(hint);
    }
    s.push(']');
    if let Some(fields) = fields {
        s.push('{');
        for (i, f) in fields.iter().enumerate() {
            if i > 0 {
                s.push(delimiter.as_char());
            }
            s.push_str(&crate::emitter::encode_key(f));
        }
        s.push('}');
    }
    s.push(':');
    s
}

/// Recognize and decompose an array header from a line's content. A quoted key
/// is only a header's key if a `[` immediately follows its closing quote;
/// otherwise the leading `"` belongs to an ordinary quoted-key key-value line.
pub fn parse_array_header(content: &str) -> Option<HeaderParse> {
    let (key_part, bracket_start) = if content.starts_with('"') {
        let end = find_closing_quote(content, 1)?;
        if !content[end + 1..].starts_with('[') {
            return None;
        }
        (&content[..=end], end + 1)
    } else {
        let bracket_start = content.find('[')?;
        (content[..bracket_start].trim(), bracket_start)
    };
    let key = if key_part.is_empty() {
        None
    } else {
        Some(unquote_token(key_part, 0).ok()?)
    };
    let rest = &content[bracket_start..];
    let (count, has_count_marker, delimiter, fields, inline_tail) = parse_bracket_tail(rest)?;
    Some(HeaderParse {
        header: ArrayHeader {
            key,
            count,
            delimiter,
            fields,
            has_count_marker,
        },
        inline_tail,
    })
}

/// Parse from the opening `[` through the terminating `:` (and any inline tail).
/// Used directly by the object/list-item decoders once a key has already been
/// extracted from the line.
pub fn parse_bracket_tail(
    rest: &str,
) -> Option<(usize, bool, Delimiter, Option<Vec<String>>, Option<String>)> {
    if !rest.starts_with('[') {
        return None;
    }
    let bracket_end = rest.find(']')?;
    let inside = &rest[1..bracket_end];
    let (count, has_marker, delimiter) = parse_bracket_interior(inside)?;
    let mut tail = &rest[bracket_end + 1..];

    let mut fields = None;
    if tail.starts_with('{') {
        let brace_end = tail.find('}')?;
        fields = Some(split_and_parse_fields(&tail[1..brace_end], delimiter)?);
        tail = &tail[brace_end + 1..];
    }

    if !tail.starts_with(':') {
        return None;
    }
    let after_colon = &tail[1..];
    let inline_tail = if after_colon.is_empty() {
        None
    } else if let Some(stripped) = after_colon.strip_prefix(' ') {
        Some(stripped.to_string())
    } else {
        Some(after_colon.to_string())
    };

    Some((count, has_marker, delimiter, fields, inline_tail))
}

/// Parse the content between `[` and `]`: optional leading `#`, optional trailing
/// `\t`/`|` delimiter hint, remainder a non-negative decimal integer.
fn parse_bracket_interior(inside: &str) -> Option<(usize, bool, Delimiter)> {
    let mut s = inside;
    let has_marker = s.starts_with('#');
    if has_marker {
        s = &s[1..];
    }
    let mut delimiter = Delimiter::Comma;
    if let Some(last) = s.chars().last() {
        if let Some(d) = Delimiter::from_hint(last) {
            delimiter = d;
            s = &s[..s.len() - last.len_utf8()];
        }
    }
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count: usize = s.parse().ok()?;
    Some((count, has_marker, delimiter))
}

fn split_and_parse_fields(s: &str, delimiter: Delimiter) -> Option<Vec<String>> {
    if s.is_empty() {
        return Some(Vec::new());
    }
    split_unquoted(s, delimiter.as_char() as u8)
        .into_iter()
        .map(|part| unquote_token(part.trim(), 0).ok())
        .collect()
}

/// True if `content` (at a given delimiter) reads as a tabular data row rather than
/// a stray key-value line sharing its depth: no `:` at all, or the first unquoted
/// delimiter occurs before the first unquoted `:` (spec §4.7).
pub fn looks_like_data_row(content: &str, delimiter: Delimiter) -> bool {
    match find_unquoted(content, b':', 0) {
        None => true,
        Some(colon_pos) => match find_unquoted(content, delimiter.as_char() as u8, 0) {
            Some(delim_pos) => delim_pos < colon_pos,
            None => false,
        },
    }
}
