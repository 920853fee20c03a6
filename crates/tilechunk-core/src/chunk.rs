//! Sparse chunk encoding of dense levels.
//!
//! A level is cut into fixed 20x18 chunks laid out on a chunk grid. Only chunks that
//! contain at least one non-empty tile are stored, and each stored chunk drops its
//! trailing all-empty rows. The level's exact width and height travel alongside the
//! chunks, which is what lets [`decode`] rebuild the grid without loss even though
//! trailing emptiness is never written down.
//!
//! Encoding is strict (ragged grids are rejected). Decoding is lenient: chunk data
//! that falls outside the declared bounds is clipped silently apart from a `warn!`
//! event. Oversized rows are not clipped to the chunk, they are written at their
//! offset from the chunk origin.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DecodeOptions;
use crate::error::Result;
use crate::level::DenseLevel;
use crate::tile::{is_empty_tile, Tile, EMPTY_TILE};

/// Chunk width in tiles.
pub const CHUNK_W: usize = 20;

/// Chunk height in tiles.
pub const CHUNK_H: usize = 18;

/// One stored 20x18 block of a level.
///
/// `rows` holds at most [`CHUNK_H`] strings of at most [`CHUNK_W`] tiles. Rows past
/// the stored count, and tiles past a row's length, are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk-grid column; the chunk's left edge is at `cx * CHUNK_W`.
    pub cx: i32,
    /// Chunk-grid row; the chunk's top edge is at `cy * CHUNK_H`.
    pub cy: i32,
    #[serde(default)]
    pub rows: Vec<String>,
}

impl Chunk {
    pub fn new(cx: i32, cy: i32, rows: Vec<String>) -> Self {
        Self { cx, cy, rows }
    }

    /// Dense-grid position of the chunk's top-left tile as `(x, y)`.
    ///
    /// Computed in `i64` so coordinates from foreign producers cannot overflow.
    pub fn origin(&self) -> (i64, i64) {
        (
            i64::from(self.cx) * CHUNK_W as i64,
            i64::from(self.cy) * CHUNK_H as i64,
        )
    }

    /// True when no stored tile is non-empty.
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| is_blank_str(row))
    }

    /// Number of non-empty stored tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    /// Non-empty stored tiles as `(local_x, local_y, tile)`.
    fn tiles(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.chars()
                .enumerate()
                .filter(|&(_, tile)| !is_empty_tile(tile))
                .map(move |(x, tile)| (x, y, tile))
        })
    }
}

/// The sparse form of one level: exact dimensions plus its non-empty chunks.
///
/// Chunks are kept in insertion order. Chunks that are not listed are entirely empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkedLevel {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub chunks: Vec<Chunk>,
}

impl ChunkedLevel {
    /// An entirely empty level of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            chunks: Vec::new(),
        }
    }

    /// First chunk stored at `(cx, cy)`, if any.
    pub fn chunk(&self, cx: i32, cy: i32) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.cx == cx && c.cy == cy)
    }

    /// Number of non-empty tiles held by the chunks, counting overlaps twice.
    pub fn tile_count(&self) -> usize {
        self.chunks.iter().map(Chunk::tile_count).sum()
    }

    /// Chunk coordinates that appear more than once, in first-repeat order.
    pub fn duplicate_coords(&self) -> Vec<(i32, i32)> {
        let mut seen = HashSet::new();
        let mut repeated = Vec::new();
        for chunk in &self.chunks {
            let coord = (chunk.cx, chunk.cy);
            if !seen.insert(coord) && !repeated.contains(&coord) {
                repeated.push(coord);
            }
        }
        repeated
    }
}

fn is_blank_str(row: &str) -> bool {
    row.chars().all(is_empty_tile)
}

/// Encode a dense level into its sparse chunk form.
///
/// Chunks are emitted in row-major chunk order (`cy` outer, `cx` inner). Row slices
/// that run past the right edge of the level are padded with empty tiles to the full
/// chunk width; trailing all-empty rows of each kept chunk are dropped.
///
/// Fails with [`CodecError::RaggedRows`](crate::CodecError::RaggedRows) when the rows
/// do not all share the same width.
pub fn encode(level: &DenseLevel) -> Result<ChunkedLevel> {
    level.validate()?;

    let width = level.width();
    let height = level.height();
    let chunk_cols = width.div_ceil(CHUNK_W);
    let chunk_rows = height.div_ceil(CHUNK_H);

    let mut chunks = Vec::new();
    for cy in 0..chunk_rows {
        for cx in 0..chunk_cols {
            if let Some(chunk) = extract_chunk(level, cx, cy) {
                chunks.push(chunk);
            }
        }
    }

    debug!(
        width,
        height,
        chunks = chunks.len(),
        total = chunk_cols * chunk_rows,
        "encoded level"
    );

    Ok(ChunkedLevel {
        width,
        height,
        chunks,
    })
}

/// Cut out chunk `(cx, cy)`, or `None` when it holds no content.
fn extract_chunk(level: &DenseLevel, cx: usize, cy: usize) -> Option<Chunk> {
    let left = cx * CHUNK_W;
    let top = cy * CHUNK_H;
    let bottom = (top + CHUNK_H).min(level.height());

    let mut rows: Vec<String> = level.rows()[top..bottom]
        .iter()
        .map(|row| {
            (left..left + CHUNK_W)
                .map(|x| row.get(x).copied().unwrap_or(EMPTY_TILE))
                .collect()
        })
        .collect();

    while rows.last().is_some_and(|row| is_blank_str(row)) {
        rows.pop();
    }

    if rows.is_empty() {
        return None;
    }

    // cx and cy index row slices that exist in memory, so both fit in i32.
    Some(Chunk::new(cx as i32, cy as i32, rows))
}

/// Rebuild the dense level described by `level`.
///
/// Starts from an all-empty `width` x `height` grid and paints each chunk in list
/// order. Empty tiles never overwrite, so a later chunk's content wins over an earlier
/// one at the same cell, and content never gets erased. Tiles outside the declared
/// bounds are dropped.
pub fn decode(level: &ChunkedLevel) -> DenseLevel {
    let mut grid = DenseLevel::filled(level.width, level.height);
    let mut clipped = 0usize;

    for chunk in &level.chunks {
        clipped += paint(&mut grid, chunk);
    }

    if clipped > 0 {
        warn!(
            width = level.width,
            height = level.height,
            clipped,
            "dropped chunk tiles outside the level bounds"
        );
    }

    let duplicates = level.duplicate_coords();
    if !duplicates.is_empty() {
        warn!(?duplicates, "merged chunks stored at the same coordinates");
    }

    debug!(
        width = level.width,
        height = level.height,
        chunks = level.chunks.len(),
        "decoded level"
    );

    grid
}

/// Decode with explicit [`DecodeOptions`], which may reject the level up front.
pub fn decode_with(level: &ChunkedLevel, options: &DecodeOptions) -> Result<DenseLevel> {
    options.admit(level)?;
    Ok(decode(level))
}

/// Paint the chunk's content into `grid`, returning how many tiles were clipped.
fn paint(grid: &mut DenseLevel, chunk: &Chunk) -> usize {
    let (left, top) = chunk.origin();
    let width = grid.width() as i64;
    let height = grid.height() as i64;
    let mut clipped = 0;

    for (x, y, tile) in chunk.tiles() {
        let dx = left + x as i64;
        let dy = top + y as i64;
        if (0..width).contains(&dx) && (0..height).contains(&dy) {
            grid.set(dx as usize, dy as usize, tile);
        } else {
            clipped += 1;
        }
    }

    clipped
}
