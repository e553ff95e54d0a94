//! WASM bindings for con-core.
//!
//! Exposes `encode` and `decode` as `#[wasm_bindgen]` functions that can be
//! called from JavaScript/TypeScript. Built with `wasm-bindgen-cli` (not
//! wasm-pack, which was archived in July 2025).
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p con-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/con-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/con_wasm.wasm
//! # Rename .js → .cjs for ESM compatibility
//! mv packages/con-js/wasm/con_wasm.js packages/con-js/wasm/con_wasm.cjs
//! ```

use wasm_bindgen::prelude::*;

/// Encode a JSON string into CON format.
///
/// Returns the CON string, or throws a JS error if the input is not valid JSON.
#[wasm_bindgen]
pub fn encode(json: &str) -> std::result::Result<String, JsValue> {
    con_core::encode(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode a CON string back into compact JSON format.
///
/// Returns the JSON string, or throws a JS error if the input is not valid CON.
#[wasm_bindgen]
pub fn decode(con: &str) -> std::result::Result<String, JsValue> {
    con_core::decode(con).map_err(|e| JsValue::from_str(&e.to_string()))
}
