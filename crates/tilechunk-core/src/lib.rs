//! Lossless sparse codec for tile-grid levels.
//!
//! Levels are authored as dense rectangles of single-character tiles where `'0'` is
//! empty. For storage they are cut into 20x18 chunks, empty chunks are dropped, and
//! each kept chunk sheds its trailing empty rows. The level's exact size is stored
//! next to the chunks so [`decode`] can rebuild the original grid.
//!
//! ```
//! use tilechunk_core::{decode, encode, DenseLevel};
//!
//! let level = DenseLevel::from_rows(["0000", "00P0", "0000"]);
//! let chunked = encode(&level).unwrap();
//! assert_eq!(chunked.chunks.len(), 1);
//! assert_eq!(decode(&chunked), level);
//! ```

pub mod chunk;
pub mod config;
pub mod error;
pub mod file;
pub mod level;
pub mod normalize;
pub mod payload;
pub mod tile;

#[cfg(test)]
mod test_util;

pub use chunk::{decode, decode_with, encode, Chunk, ChunkedLevel, CHUNK_H, CHUNK_W};
pub use config::{DecodeOptions, DuplicateChunks};
pub use error::{CodecError, Result};
pub use file::{decode_many, decode_many_with, encode_many, ChunkedLevelsFile, FORMAT_TAG};
pub use level::{DenseLevel, StoredRow};
pub use normalize::normalize;
pub use payload::{load_levels, LevelData, StoredLevels};
pub use tile::{is_empty_tile, Tile, EMPTY_TILE};
