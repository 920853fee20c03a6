//! Functions exposed to the editor and gallery front end.
//!
//! Dense levels cross the boundary as arrays of row strings (arrays of one-character
//! cells are accepted too). Chunked data crosses as plain objects in the stored JSON
//! shape. Failures are thrown as `{ code, message }` objects.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tilechunk_core::{
    decode_with, encode, encode_many, normalize, ChunkedLevel, CodecError, DecodeOptions,
    DenseLevel, LevelData, StoredLevels,
};
use wasm_bindgen::prelude::*;

/// Structured error object for JavaScript
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsCodecError {
    code: String,
    message: String,
}

impl From<CodecError> for JsCodecError {
    fn from(err: CodecError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl JsCodecError {
    fn from_error<E: std::fmt::Display>(err: E) -> JsValue {
        let error = Self {
            code: "INVALID_ARGUMENT".to_string(),
            message: err.to_string(),
        };
        serde_wasm_bindgen::to_value(&error).unwrap_or(JsValue::NULL)
    }
}

fn to_js_error(err: CodecError) -> JsValue {
    let js_error = JsCodecError::from(err);
    serde_wasm_bindgen::to_value(&js_error).unwrap_or(JsValue::NULL)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsCodecError::from_error)
}

fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(JsCodecError::from_error)
}

/// `undefined` and `null` select the lenient defaults.
fn options_from_js(options: JsValue) -> Result<DecodeOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(DecodeOptions::default())
    } else {
        from_js(options)
    }
}

/// Encode a list of dense levels into a chunked levels file object.
#[wasm_bindgen(js_name = encodeLevels)]
pub fn encode_levels(levels: JsValue) -> Result<JsValue, JsValue> {
    let levels: Vec<DenseLevel> = from_js(levels)?;
    let file = encode_many(&levels).map_err(to_js_error)?;
    to_js(&file)
}

/// Encode a list of dense levels straight to the JSON text handed to storage.
#[wasm_bindgen(js_name = encodeLevelsJson)]
pub fn encode_levels_json(levels: JsValue) -> Result<String, JsValue> {
    let levels: Vec<DenseLevel> = from_js(levels)?;
    let file = encode_many(&levels).map_err(to_js_error)?;
    serde_json::to_string(&file).map_err(|e| to_js_error(e.into()))
}

/// Encode one dense level into the `data` body of a share or gallery entry.
#[wasm_bindgen(js_name = encodeLevel)]
pub fn encode_level(level: JsValue) -> Result<JsValue, JsValue> {
    let level: DenseLevel = from_js(level)?;
    let chunked: ChunkedLevel = encode(&level).map_err(to_js_error)?;
    to_js(&chunked)
}

/// Decode a stored levels payload of any accepted shape into arrays of row strings.
#[wasm_bindgen(js_name = decodeLevels)]
pub fn decode_levels(payload: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    let payload: Value = from_js(payload)?;
    let rows = decode_payload(payload, &options).map_err(to_js_error)?;
    to_js(&rows)
}

/// Same as `decodeLevels`, reading the JSON text returned by storage.
#[wasm_bindgen(js_name = decodeLevelsJson)]
pub fn decode_levels_json(text: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    let payload: Value = serde_json::from_str(text).map_err(|e| to_js_error(e.into()))?;
    let rows = decode_payload(payload, &options).map_err(to_js_error)?;
    to_js(&rows)
}

/// Decode one chunked level object into row strings.
#[wasm_bindgen(js_name = decodeLevel)]
pub fn decode_level(level: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    let level: ChunkedLevel = from_js(level)?;
    let rows = decode_chunked(&level, &options).map_err(to_js_error)?;
    to_js(&rows)
}

/// Decode the `data` body of a share or gallery entry into row strings.
#[wasm_bindgen(js_name = decodeLevelData)]
pub fn decode_level_data(data: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let options = options_from_js(options)?;
    let data: Value = from_js(data)?;
    let rows = decode_data(data, &options).map_err(to_js_error)?;
    to_js(&rows)
}

/// Trim empty margins and empty bands from an editor grid.
#[wasm_bindgen(js_name = normalizeLevel)]
pub fn normalize_level(level: JsValue) -> Result<JsValue, JsValue> {
    let level: DenseLevel = from_js(level)?;
    to_js(&normalize(&level))
}

fn decode_payload(
    payload: Value,
    options: &DecodeOptions,
) -> Result<Vec<Vec<String>>, CodecError> {
    let levels = StoredLevels::from_value(payload)?.into_dense(options)?;
    Ok(levels.iter().map(DenseLevel::rows_as_strings).collect())
}

fn decode_chunked(
    level: &ChunkedLevel,
    options: &DecodeOptions,
) -> Result<Vec<String>, CodecError> {
    Ok(decode_with(level, options)?.rows_as_strings())
}

fn decode_data(data: Value, options: &DecodeOptions) -> Result<Vec<String>, CodecError> {
    let level = LevelData::from_value(data)?.into_dense(options)?;
    Ok(level.rows_as_strings())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tilechunk_core::DuplicateChunks;

    #[test]
    fn test_js_error_from_codec_error() {
        let err = JsCodecError::from(CodecError::UnsupportedFormat("v9".to_string()));
        assert_eq!(err.code, "UNSUPPORTED_FORMAT");
        assert_eq!(err.message, "unsupported level format: \"v9\"");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "code": "UNSUPPORTED_FORMAT", "message": "unsupported level format: \"v9\"" })
        );
    }

    #[test]
    fn test_decode_payload_chunked() {
        let levels = vec![DenseLevel::from_rows(["000", "0P0"])];
        let file = serde_json::to_value(encode_many(&levels).unwrap()).unwrap();
        let rows = decode_payload(file, &DecodeOptions::default()).unwrap();
        assert_eq!(rows, vec![vec!["000".to_string(), "0P0".to_string()]]);
    }

    #[test]
    fn test_decode_payload_legacy() {
        let rows = decode_payload(json!([["01", "10"]]), &DecodeOptions::default()).unwrap();
        assert_eq!(rows, vec![vec!["01".to_string(), "10".to_string()]]);
    }

    #[test]
    fn test_decode_payload_unknown_format() {
        let err = decode_payload(json!({ "format": "rle" }), &DecodeOptions::default())
            .unwrap_err();
        assert_eq!(err.code(), "UNSUPPORTED_FORMAT");
    }

    #[test]
    fn test_decode_chunked_level() {
        let level: ChunkedLevel = serde_json::from_value(json!({
            "width": 3,
            "height": 2,
            "chunks": [{ "cx": 0, "cy": 0, "rows": ["000", "0E"] }]
        }))
        .unwrap();
        let rows = decode_chunked(&level, &DecodeOptions::default()).unwrap();
        assert_eq!(rows, vec!["000".to_string(), "0E0".to_string()]);

        let limited = DecodeOptions {
            max_cells: Some(5),
            ..DecodeOptions::default()
        };
        let err = decode_chunked(&level, &limited).unwrap_err();
        assert_eq!(err.code(), "LEVEL_TOO_LARGE");
    }

    #[test]
    fn test_decode_data_strict_duplicates() {
        let data = json!({
            "width": 2,
            "height": 1,
            "chunks": [
                { "cx": 0, "cy": 0, "rows": ["A"] },
                { "cx": 0, "cy": 0, "rows": ["0B"] }
            ]
        });

        let merged = decode_data(data.clone(), &DecodeOptions::default()).unwrap();
        assert_eq!(merged, vec!["AB".to_string()]);

        let strict = DecodeOptions {
            duplicate_chunks: DuplicateChunks::Reject,
            ..DecodeOptions::default()
        };
        let err = decode_data(data, &strict).unwrap_err();
        assert_eq!(err.code(), "DUPLICATE_CHUNK");
    }
}
