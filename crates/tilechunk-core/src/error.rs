use thiserror::Error;

/// Errors raised at the codec boundaries.
///
/// Encoding is strict about the dense grid it receives; decoding is lenient about
/// chunk data and only fails on payloads it cannot interpret at all.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A dense level whose rows do not all share the width of the first row.
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unsupported level format: {0:?}")]
    UnsupportedFormat(String),

    #[error("unsupported chunk size {width}x{height}")]
    UnsupportedChunkSize { width: u32, height: u32 },

    /// Stored JSON matched neither the chunked nor the legacy dense shape.
    #[error("unrecognized level payload: {0}")]
    UnrecognizedPayload(String),

    #[error("duplicate chunk at ({cx}, {cy})")]
    DuplicateChunk { cx: i32, cy: i32 },

    #[error("level of {width}x{height} exceeds the limit of {limit} tiles")]
    LevelTooLarge {
        width: usize,
        height: usize,
        limit: usize,
    },

    #[error("invalid level JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    /// Stable identifier for callers that branch on the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::RaggedRows { .. } => "RAGGED_ROWS",
            CodecError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            CodecError::UnsupportedChunkSize { .. } => "UNSUPPORTED_CHUNK_SIZE",
            CodecError::UnrecognizedPayload(_) => "UNRECOGNIZED_PAYLOAD",
            CodecError::DuplicateChunk { .. } => "DUPLICATE_CHUNK",
            CodecError::LevelTooLarge { .. } => "LEVEL_TOO_LARGE",
            CodecError::Json(_) => "INVALID_JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
