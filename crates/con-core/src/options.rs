//! Public options for [`crate::serialize`] and [`crate::deserialize`] (spec §6).

use crate::lexical::Delimiter;

/// The two-space unit used for one nesting level (key→value, header→body, item→member).
pub const INDENT_SIZE: usize = 2;

/// Options controlling emission.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// The active delimiter for inline values, tabular rows, and field lists.
    pub delimiter: Delimiter,
    /// Reserved: the core always produces the indented form described in §4.4.
    /// Kept for API parity with the spec's public option surface.
    pub pretty: bool,
    /// When true, assert (symmetrically with `deserialize`'s strict mode) that the
    /// element count recorded in every array header equals the body's actual length.
    /// Always holds for arrays built by this crate's own emission path; exists so a
    /// caller constructing headers manually gets the same validation deserialize does.
    pub strict_arrays: bool,
    /// Minimum array length before a tabular-eligible array is actually tabularized.
    /// Below this length, eligible arrays fall back to the mixed-list form.
    pub min_tabular_length: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            pretty: true,
            strict_arrays: false,
            min_tabular_length: 2,
        }
    }
}

/// Options controlling parsing.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Enables indentation-regularity checks (§4.5) and count assertions (§4.7).
    /// Malformed quoted tokens, malformed headers, and disallowed escapes are hard
    /// syntax errors regardless of this flag.
    pub strict: bool,
}
