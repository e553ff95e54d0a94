//! # con-core
//!
//! Pure-Rust codec for **CON (Compact Object Notation)**.
//!
//! CON is a compact, human-readable serialization format designed to reduce LLM
//! token consumption when processing structured data. It achieves this through key
//! folding (indentation instead of braces), tabular compression for uniform arrays,
//! and context-dependent quoting that eliminates unnecessary quote tokens.
//!
//! ## Quick start
//!
//! ```rust
//! use con_core::{encode, decode};
//!
//! // JSON → CON
//! let json = r#"{"name":"Alice","scores":[95,87,92]}"#;
//! let con = encode(json).unwrap();
//! assert_eq!(con, "name: Alice\nscores[3]: 95,87,92");
//!
//! // CON → JSON (roundtrip)
//! let back = decode(&con).unwrap();
//! assert_eq!(back, json);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the closed `Value` AST all the other modules operate on
//! - [`normalize`] — `serde_json::Value` → `Value`, folding `-0` and non-finite numbers
//! - [`shape`] — array shape classification (inline/tabular/list)
//! - [`lexical`] — quoting, escaping, and literal grammar shared by both directions
//! - [`header`] — the `key[N]{fields}:` array header grammar
//! - [`line`] — the indentation line model the parser walks
//! - [`emitter`] — `Value` → CON text
//! - [`parser`] — CON text → `Value`
//! - [`tokens`] — rough token-savings estimation
//! - [`filter`] — semantic field stripping + CON encode (`filter_and_encode`, `CalendarFilter`)
//! - [`error`] — error types for normalize/emit/parse failures

pub mod emitter;
pub mod error;
pub mod filter;
pub mod header;
pub mod lexical;
pub mod line;
pub mod normalize;
pub mod options;
pub mod parser;
pub mod shape;
pub mod tokens;
pub mod value;

pub use emitter::serialize;
pub use error::{ConError, Result};
pub use filter::{filter_and_encode, filter_fields, CalendarFilter};
pub use lexical::Delimiter;
pub use normalize::normalize;
pub use options::{EmitOptions, ParseOptions};
pub use parser::deserialize;
pub use tokens::{count_tokens, DefaultTokenizer, Savings, TokenSavings, Tokenizer};
pub use value::Value;

/// Encode a JSON string directly to CON text using default options. Convenience
/// wrapper around [`normalize`] + [`serialize`].
pub fn encode(json: &str) -> Result<String> {
    emitter::encode(json)
}

/// Decode a CON string directly to compact JSON text using default options.
/// Convenience wrapper around [`deserialize`].
pub fn decode(con: &str) -> Result<String> {
    parser::decode(con)
}
