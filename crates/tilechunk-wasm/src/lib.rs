mod api;

pub use api::{
    decode_level, decode_level_data, decode_levels, decode_levels_json, encode_level,
    encode_levels, encode_levels_json, normalize_level, JsCodecError,
};

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
