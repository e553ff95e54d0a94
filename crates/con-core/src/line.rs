//! The line model (spec §4.5): a pre-pass that splits source text into indented
//! lines, computing depth from leading spaces and tagging blank lines for skipping.
//! The parser pre-splits the whole input rather than streaming, which is fine at
//! prompt-sized payloads and dramatically simplifies the recursive decoder (it never
//! has to peek ahead across a suspension point).

use crate::error::{syntax_err, Result};
use crate::options::INDENT_SIZE;

#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub content: &'a str,
    pub depth: usize,
    pub line_number: usize,
}

/// Split `text` into non-blank line records. Blank (all-whitespace) lines are never
/// significant to structure and are skipped entirely rather than recorded.
///
/// In strict mode, a tab anywhere in a line's leading whitespace run is rejected,
/// and the leading-space count must be an exact multiple of [`INDENT_SIZE`].
pub fn split_lines(text: &str, strict: bool) -> Result<Vec<Line<'_>>> {
    let mut lines = Vec::new();
    for (i, raw) in text.split('\n').enumerate() {
        if raw.trim().is_empty() {
            continue;
        }
        let line_number = i + 1;
        let ws_end = raw
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(raw.len());
        let leading_ws = &raw[..ws_end];
        if strict && leading_ws.contains('\t') {
            return Err(syntax_err(line_number, "tab character in indentation"));
        }
        let indent = leading_ws.chars().take_while(|&c| c == ' ').count();
        if strict && indent % INDENT_SIZE != 0 {
            return Err(syntax_err(
                line_number,
                format!("indentation ({indent} spaces) is not a multiple of {INDENT_SIZE}"),
            ));
        }
        let depth = indent / INDENT_SIZE;
        lines.push(Line {
            content: &raw[indent..],
            depth,
            line_number,
        });
    }
    Ok(lines)
}
