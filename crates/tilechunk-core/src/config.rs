//! Decode-time policy.
//!
//! The defaults reproduce the lenient read path: overlapping chunks are merged and
//! any declared size is accepted. Callers reading untrusted payloads can tighten both.

use serde::{Deserialize, Serialize};

use crate::chunk::ChunkedLevel;
use crate::error::{CodecError, Result};

/// What to do when a level lists the same chunk coordinates more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicateChunks {
    /// Paint every copy in list order; later non-empty tiles win.
    #[default]
    Merge,
    /// Fail with [`CodecError::DuplicateChunk`].
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecodeOptions {
    pub duplicate_chunks: DuplicateChunks,
    /// Upper bound on `width * height`; `None` accepts any size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cells: Option<usize>,
}

impl DecodeOptions {
    /// Options that reject duplicate chunks and cap the level area.
    pub fn strict(max_cells: usize) -> Self {
        Self {
            duplicate_chunks: DuplicateChunks::Reject,
            max_cells: Some(max_cells),
        }
    }

    /// Check `level` against these options before it is decoded.
    pub(crate) fn admit(&self, level: &ChunkedLevel) -> Result<()> {
        self.admit_size(level.width, level.height)?;

        if self.duplicate_chunks == DuplicateChunks::Reject {
            if let Some(&(cx, cy)) = level.duplicate_coords().first() {
                return Err(CodecError::DuplicateChunk { cx, cy });
            }
        }

        Ok(())
    }

    pub(crate) fn admit_size(&self, width: usize, height: usize) -> Result<()> {
        let Some(limit) = self.max_cells else {
            return Ok(());
        };

        match width.checked_mul(height) {
            Some(cells) if cells <= limit => Ok(()),
            _ => Err(CodecError::LevelTooLarge {
                width,
                height,
                limit,
            }),
        }
    }
}
