//! The load-path boundary for stored level blobs.
//!
//! Storage hands back JSON that is either a chunked levels file or one of the two
//! legacy dense shapes that predate it:
//!
//! - a bare array of levels, each an array of rows: `[["0P0", ...], ...]`
//! - an object wrapping that array: `{ "levels": [["0P0", ...], ...] }`
//!
//! An object carrying a `format` tag is always treated as chunked, and any tag other
//! than [`FORMAT_TAG`] is rejected rather than guessed at.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::chunk::{decode_with, encode, ChunkedLevel};
use crate::config::DecodeOptions;
use crate::error::{CodecError, Result};
use crate::file::{decode_many_with, ChunkedLevelsFile, FORMAT_TAG};
use crate::level::DenseLevel;

/// A stored multi-level payload after its shape has been identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredLevels {
    Chunked(ChunkedLevelsFile),
    /// Legacy dense levels, passed through as stored.
    Dense(Vec<DenseLevel>),
}

impl StoredLevels {
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_array() {
            debug!("stored levels are a legacy dense array");
            return Ok(StoredLevels::Dense(serde_json::from_value(value)?));
        }

        let Value::Object(map) = &value else {
            return Err(CodecError::UnrecognizedPayload(format!(
                "expected an array or object, got {}",
                json_kind(&value)
            )));
        };

        let tag = map.get("format").map(|format| match format.as_str() {
            Some(tag) => tag.to_string(),
            None => format.to_string(),
        });
        let legacy_levels = map.contains_key("levels");

        match tag {
            Some(tag) if tag == FORMAT_TAG => {
                let file: ChunkedLevelsFile = serde_json::from_value(value)?;
                file.validate_header()?;
                Ok(StoredLevels::Chunked(file))
            }
            Some(tag) => Err(CodecError::UnsupportedFormat(tag)),
            None if legacy_levels => {
                debug!("stored levels are a legacy dense object");
                let mut value = value;
                let levels = value
                    .get_mut("levels")
                    .map(Value::take)
                    .unwrap_or(Value::Null);
                Ok(StoredLevels::Dense(serde_json::from_value(levels)?))
            }
            None => Err(CodecError::UnrecognizedPayload(
                "object has neither a `format` tag nor a `levels` array".to_string(),
            )),
        }
    }

    pub fn level_count(&self) -> usize {
        match self {
            StoredLevels::Chunked(file) => file.levels.len(),
            StoredLevels::Dense(levels) => levels.len(),
        }
    }

    /// Produce dense levels ready for play or editing.
    pub fn into_dense(self, options: &DecodeOptions) -> Result<Vec<DenseLevel>> {
        match self {
            StoredLevels::Chunked(file) => decode_many_with(&file, options),
            StoredLevels::Dense(levels) => Ok(levels),
        }
    }
}

/// Parse stored JSON text of any accepted shape into dense levels.
pub fn load_levels(text: &str, options: &DecodeOptions) -> Result<Vec<DenseLevel>> {
    StoredLevels::from_json(text)?.into_dense(options)
}

/// The level body embedded in gallery and share payloads (their `data` field).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelData {
    Chunked(ChunkedLevel),
    Dense(DenseLevel),
}

impl LevelData {
    /// Chunked level data for sharing `level`.
    pub fn encode(level: &DenseLevel) -> Result<Self> {
        encode(level).map(LevelData::Chunked)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        if !matches!(value, Value::Array(_) | Value::Object(_)) {
            return Err(CodecError::UnrecognizedPayload(format!(
                "level data must be an array or object, got {}",
                json_kind(&value)
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn into_dense(self, options: &DecodeOptions) -> Result<DenseLevel> {
        match self {
            LevelData::Chunked(level) => decode_with(&level, options),
            LevelData::Dense(level) => Ok(level),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
