//! Tile symbols.
//!
//! A tile is a single character. The codec only distinguishes the empty tile from
//! everything else; what a non-empty symbol means is up to the game.

/// A single grid cell.
pub type Tile = char;

/// The distinguished empty tile.
pub const EMPTY_TILE: Tile = '0';

#[inline]
pub fn is_empty_tile(tile: Tile) -> bool {
    tile == EMPTY_TILE
}

/// True when every tile in the run is empty (an empty run counts as blank).
pub fn is_blank<'a, I>(tiles: I) -> bool
where
    I: IntoIterator<Item = &'a Tile>,
{
    tiles.into_iter().all(|&t| is_empty_tile(t))
}
