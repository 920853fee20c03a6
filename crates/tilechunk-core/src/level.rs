//! Dense tile grids.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};
use crate::tile::{is_blank, Tile, EMPTY_TILE};

/// A full grid of tiles, one character per cell, stored row by row.
///
/// Serialized as an array of row strings. Deserialization also accepts the legacy
/// per-cell form where each row is an array of one-character strings.
///
/// Rows are not required to share a length at construction time; [`DenseLevel::validate`]
/// checks that, and the encoder refuses grids that fail it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<StoredRow>", into = "Vec<String>")]
pub struct DenseLevel {
    rows: Vec<Vec<Tile>>,
}

impl DenseLevel {
    pub fn new(rows: Vec<Vec<Tile>>) -> Self {
        Self { rows }
    }

    /// Build a level from row strings.
    ///
    /// ```
    /// use tilechunk_core::DenseLevel;
    ///
    /// let level = DenseLevel::from_rows(["000", "0P0"]);
    /// assert_eq!(level.width(), 3);
    /// assert_eq!(level.height(), 2);
    /// ```
    pub fn from_rows<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.as_ref().chars().collect())
                .collect(),
        }
    }

    /// A `width` x `height` grid of empty tiles.
    pub fn filled(width: usize, height: usize) -> Self {
        Self {
            rows: vec![vec![EMPTY_TILE; width]; height],
        }
    }

    /// Width of the grid, taken from the first row (0 for a level without rows).
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.rows
    }

    /// Tile at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        self.rows.get(y)?.get(x).copied()
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if let Some(cell) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = tile;
        }
    }

    /// True when the level holds no content at all.
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|row| is_blank(row))
    }

    /// Check that every row has the width of the first row.
    pub fn validate(&self) -> Result<()> {
        let expected = self.width();
        match self
            .rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != expected)
        {
            Some((row, tiles)) => Err(CodecError::RaggedRows {
                row,
                expected,
                found: tiles.len(),
            }),
            None => Ok(()),
        }
    }

    pub fn rows_as_strings(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().collect()).collect()
    }
}

impl fmt::Display for DenseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{}", tile)?;
            }
        }
        Ok(())
    }
}

impl From<DenseLevel> for Vec<String> {
    fn from(level: DenseLevel) -> Self {
        level.rows_as_strings()
    }
}

/// One row as it appears in stored JSON: a string, or an array of one-character cells.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StoredRow {
    Text(String),
    Cells(Vec<String>),
}

impl TryFrom<Vec<StoredRow>> for DenseLevel {
    type Error = String;

    fn try_from(rows: Vec<StoredRow>) -> std::result::Result<Self, Self::Error> {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(y, row)| match row {
                StoredRow::Text(text) => Ok(text.chars().collect()),
                StoredRow::Cells(cells) => cells
                    .iter()
                    .enumerate()
                    .map(|(x, cell)| {
                        let mut chars = cell.chars();
                        match (chars.next(), chars.next()) {
                            (Some(tile), None) => Ok(tile),
                            _ => Err(format!(
                                "cell ({}, {}) must be a single tile symbol, got {:?}",
                                x, y, cell
                            )),
                        }
                    })
                    .collect(),
            })
            .collect::<std::result::Result<Vec<Vec<Tile>>, String>>()?;

        Ok(Self { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dimensions() {
        let level = DenseLevel::from_rows(["0000", "0H00", "0000"]);
        assert_eq!(level.width(), 4);
        assert_eq!(level.height(), 3);
        assert_eq!(level.get(1, 1), Some('H'));
        assert_eq!(level.get(4, 1), None);
        assert_eq!(level.get(0, 3), None);
    }

    #[test]
    fn test_empty_level() {
        let level = DenseLevel::default();
        assert_eq!(level.width(), 0);
        assert_eq!(level.height(), 0);
        assert!(level.is_blank());
        assert!(level.validate().is_ok());
    }

    #[test]
    fn test_filled() {
        let level = DenseLevel::filled(3, 2);
        assert_eq!(level.rows_as_strings(), vec!["000", "000"]);
        assert!(level.is_blank());
    }

    #[test]
    fn test_validate_ragged() {
        let level = DenseLevel::from_rows(["00", "0"]);
        match level.validate() {
            Err(CodecError::RaggedRows {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 1);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected RaggedRows, got {:?}", other),
        }
    }

    #[test]
    fn test_display() {
        let level = DenseLevel::from_rows(["01", "20"]);
        assert_eq!(level.to_string(), "01\n20");
    }

    #[test]
    fn test_serialize_as_row_strings() {
        let level = DenseLevel::from_rows(["010", "000"]);
        assert_eq!(serde_json::to_value(&level).unwrap(), json!(["010", "000"]));
    }

    #[test]
    fn test_deserialize_row_strings() {
        let level: DenseLevel = serde_json::from_value(json!(["0P", "10"])).unwrap();
        assert_eq!(level, DenseLevel::from_rows(["0P", "10"]));
    }

    #[test]
    fn test_deserialize_cell_arrays() {
        let level: DenseLevel =
            serde_json::from_value(json!([["0", "P"], ["1", "0"]])).unwrap();
        assert_eq!(level, DenseLevel::from_rows(["0P", "10"]));
    }

    #[test]
    fn test_deserialize_rejects_multi_char_cell() {
        let result = serde_json::from_value::<DenseLevel>(json!([["0", "PP"]]));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("single tile symbol"), "{}", err);
    }

    #[test]
    fn test_set_ignores_out_of_bounds() {
        let mut level = DenseLevel::filled(2, 2);
        level.set(1, 1, 'X');
        level.set(5, 0, 'Y');
        assert_eq!(level.rows_as_strings(), vec!["00", "0X"]);
    }
}
