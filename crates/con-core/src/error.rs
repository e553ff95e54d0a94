//! Error types for CON encoding and decoding operations.

use thiserror::Error;

/// Errors that can occur during CON normalization, emission, or parsing.
#[derive(Error, Debug)]
pub enum ConError {
    /// The input string was not valid JSON (the `encode`/`decode` text convenience path).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The value tree contains a cycle; the emitter stops before producing any output.
    #[error("cycle detected in value tree")]
    CycleDetected,

    /// Malformed input: a bad quoted token, a malformed header, an unknown escape,
    /// or (in strict mode) bad indentation. Carries the 1-based line number and,
    /// where cheaply available, the column.
    #[error("syntax error at line {line}: {message}")]
    SyntaxError {
        line: usize,
        column: Option<usize>,
        message: String,
    },

    /// A strict-mode count assertion failed: a header declared one count but the
    /// body produced (or the emitter was asked to record) another.
    #[error("count mismatch in {kind}: header declared {expected}, found {actual}")]
    CountMismatch {
        expected: usize,
        actual: usize,
        kind: &'static str,
    },

    /// `deserialize`/`decode` was called on empty or whitespace-only text.
    #[error("input is empty")]
    EmptyInput,
}

/// Convenience alias used throughout con-core.
pub type Result<T> = std::result::Result<T, ConError>;

pub(crate) fn syntax_err(line: usize, message: impl Into<String>) -> ConError {
    ConError::SyntaxError {
        line,
        column: None,
        message: message.into(),
    }
}
