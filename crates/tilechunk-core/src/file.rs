//! The versioned multi-level container used for storage and transmission.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chunk::{decode, encode, ChunkedLevel, CHUNK_H, CHUNK_W};
use crate::config::DecodeOptions;
use crate::error::{CodecError, Result};
use crate::level::DenseLevel;

/// Format tag written into every chunked levels file.
pub const FORMAT_TAG: &str = "chunks20x18";

/// One or more chunked levels plus the header identifying their encoding.
///
/// ```json
/// { "format": "chunks20x18", "chunkWidth": 20, "chunkHeight": 18, "levels": [...] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkedLevelsFile {
    pub format: String,
    #[serde(default = "default_chunk_width")]
    pub chunk_width: u32,
    #[serde(default = "default_chunk_height")]
    pub chunk_height: u32,
    #[serde(default)]
    pub levels: Vec<ChunkedLevel>,
}

fn default_chunk_width() -> u32 {
    CHUNK_W as u32
}

fn default_chunk_height() -> u32 {
    CHUNK_H as u32
}

impl ChunkedLevelsFile {
    pub fn new(levels: Vec<ChunkedLevel>) -> Self {
        Self {
            format: FORMAT_TAG.to_string(),
            chunk_width: default_chunk_width(),
            chunk_height: default_chunk_height(),
            levels,
        }
    }

    /// Ensure the header names the one encoding this codec reads.
    pub fn validate_header(&self) -> Result<()> {
        if self.format != FORMAT_TAG {
            return Err(CodecError::UnsupportedFormat(self.format.clone()));
        }
        if self.chunk_width as usize != CHUNK_W || self.chunk_height as usize != CHUNK_H {
            return Err(CodecError::UnsupportedChunkSize {
                width: self.chunk_width,
                height: self.chunk_height,
            });
        }
        Ok(())
    }
}

impl Default for ChunkedLevelsFile {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Encode every level into a single file, preserving level order.
///
/// Fails on the first ragged level.
pub fn encode_many(levels: &[DenseLevel]) -> Result<ChunkedLevelsFile> {
    #[cfg(feature = "parallel")]
    let encoded = {
        use rayon::prelude::*;
        levels.par_iter().map(encode).collect::<Result<Vec<_>>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let encoded = levels.iter().map(encode).collect::<Result<Vec<_>>>()?;

    debug!(levels = encoded.len(), "encoded levels file");
    Ok(ChunkedLevelsFile::new(encoded))
}

/// Decode every level of `file` with the lenient defaults.
pub fn decode_many(file: &ChunkedLevelsFile) -> Result<Vec<DenseLevel>> {
    file.validate_header()?;

    #[cfg(feature = "parallel")]
    let decoded = {
        use rayon::prelude::*;
        file.levels.par_iter().map(decode).collect::<Vec<_>>()
    };

    #[cfg(not(feature = "parallel"))]
    let decoded = file.levels.iter().map(decode).collect::<Vec<_>>();

    debug!(levels = decoded.len(), "decoded levels file");
    Ok(decoded)
}

/// Decode every level of `file`, checking each against `options` first.
pub fn decode_many_with(
    file: &ChunkedLevelsFile,
    options: &DecodeOptions,
) -> Result<Vec<DenseLevel>> {
    file.validate_header()?;
    for level in &file.levels {
        options.admit(level)?;
    }
    decode_many(file)
}
