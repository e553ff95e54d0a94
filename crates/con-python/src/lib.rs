//! # con-python
//!
//! Python bindings for the CON format encoder/decoder, built with PyO3.
//!
//! Exposes the following functions to Python as the `con_format` module:
//!
//! - `encode(json)` -- JSON string -> CON string
//! - `decode(con)` -- CON string -> JSON string
//! - `filter_and_encode(json, patterns)` -- semantic filter + CON encode

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Encode a JSON string into CON format.
///
/// Args:
///     json: A valid JSON string.
///
/// Returns:
///     The CON-encoded string.
///
/// Raises:
///     ValueError: If the input is not valid JSON or encoding fails.
#[pyfunction]
fn encode(json: &str) -> PyResult<String> {
    con_core::encode(json).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Decode a CON string back into JSON.
///
/// Args:
///     con: A valid CON string.
///
/// Returns:
///     The JSON string.
///
/// Raises:
///     ValueError: If the input is not valid CON or decoding fails.
#[pyfunction]
fn decode(con: &str) -> PyResult<String> {
    con_core::decode(con).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Filter fields from a JSON string by pattern, then encode to CON.
///
/// Patterns support dot-separated paths and wildcards:
/// - `"etag"` -- strip the top-level field named "etag"
/// - `"items.etag"` -- strip "etag" inside objects under "items"
/// - `"*.etag"` -- wildcard: strip "etag" at any depth
///
/// Args:
///     json: A valid JSON string.
///     patterns: A list of field patterns to strip.
///
/// Returns:
///     The filtered CON-encoded string.
///
/// Raises:
///     ValueError: If the input is not valid JSON or encoding fails.
#[pyfunction]
fn filter_and_encode(json: &str, patterns: Vec<String>) -> PyResult<String> {
    let pattern_refs: Vec<&str> = patterns.iter().map(|s| s.as_str()).collect();
    con_core::filter_and_encode(json, &pattern_refs).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// The `con_format` Python module, implemented in Rust via PyO3.
#[pymodule]
fn con_format(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(encode, m)?)?;
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    m.add_function(wrap_pyfunction!(filter_and_encode, m)?)?;
    Ok(())
}
