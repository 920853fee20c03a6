//! Bounding-box normalization of dense levels.
//!
//! Editors grow the paint buffer freely, so saved grids tend to carry empty margins
//! and empty interior bands. [`normalize`] drops every all-empty row, then every
//! column that is empty in all remaining rows. It is an optional pre-pass; the
//! encoder never calls it.

use tracing::debug;

use crate::level::DenseLevel;
use crate::tile::{is_blank, is_empty_tile, Tile, EMPTY_TILE};

/// Strip all-empty rows and columns from `level`.
///
/// The result is always rectangular with at least one row and one column: a level
/// without any content normalizes to the single empty tile `["0"]`. Short rows are
/// read as if padded with empty tiles.
///
/// ```
/// use tilechunk_core::{normalize, DenseLevel};
///
/// let level = DenseLevel::from_rows(["000", "010", "000"]);
/// assert_eq!(normalize(&level), DenseLevel::from_rows(["1"]));
/// ```
pub fn normalize(level: &DenseLevel) -> DenseLevel {
    let rows: Vec<&[Tile]> = level
        .rows()
        .iter()
        .map(Vec::as_slice)
        .filter(|row| !is_blank(*row))
        .collect();

    let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);
    let columns: Vec<usize> = (0..width)
        .filter(|&x| {
            rows.iter()
                .any(|row| row.get(x).is_some_and(|&t| !is_empty_tile(t)))
        })
        .collect();

    if rows.is_empty() || columns.is_empty() {
        debug!(
            width = level.width(),
            height = level.height(),
            "level has no content, normalized to a single empty tile"
        );
        return DenseLevel::new(vec![vec![EMPTY_TILE]]);
    }

    let normalized = DenseLevel::new(
        rows.iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|&x| row.get(x).copied().unwrap_or(EMPTY_TILE))
                    .collect()
            })
            .collect(),
    );

    debug!(
        from_width = level.width(),
        from_height = level.height(),
        width = normalized.width(),
        height = normalized.height(),
        "normalized level"
    );

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::random_level;
    use rstest::rstest;

    #[test]
    fn test_single_content_tile() {
        let level = DenseLevel::from_rows(["000", "010", "000"]);
        let normalized = normalize(&level);
        assert_eq!(normalized, DenseLevel::from_rows(["1"]));
        assert_eq!(normalized.width(), 1);
        assert_eq!(normalized.height(), 1);
    }

    #[test]
    fn test_interior_empty_bands_removed() {
        let level = DenseLevel::from_rows([
            "00000",
            "0H0E0",
            "00000",
            "0P0#0",
        ]);
        assert_eq!(normalize(&level), DenseLevel::from_rows(["HE", "P#"]));
    }

    #[test]
    fn test_column_kept_if_any_row_uses_it() {
        let level = DenseLevel::from_rows(["1000", "0002"]);
        assert_eq!(normalize(&level), DenseLevel::from_rows(["10", "02"]));
    }

    #[rstest]
    #[case::no_rows(DenseLevel::default())]
    #[case::zero_width(DenseLevel::from_rows(["", "", ""]))]
    #[case::all_empty(DenseLevel::filled(40, 36))]
    #[case::single_empty(DenseLevel::from_rows(["0"]))]
    fn test_blank_levels_collapse_to_single_tile(#[case] level: DenseLevel) {
        assert_eq!(normalize(&level), DenseLevel::from_rows(["0"]));
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let level = DenseLevel::from_rows(["0001", "1"]);
        let normalized = normalize(&level);
        assert_eq!(normalized, DenseLevel::from_rows(["01", "10"]));
        assert!(normalized.validate().is_ok());
    }

    #[test]
    fn test_input_untouched() {
        let level = DenseLevel::from_rows(["000", "0X0"]);
        let before = level.clone();
        let _ = normalize(&level);
        assert_eq!(level, before);
    }

    #[rstest]
    #[case::tiny(3, 2, 0.3)]
    #[case::one_chunk(20, 18, 0.05)]
    #[case::unaligned(37, 19, 0.02)]
    #[case::dense(45, 40, 0.6)]
    #[case::very_sparse(64, 54, 0.002)]
    fn test_idempotent_and_never_grows(
        #[case] width: usize,
        #[case] height: usize,
        #[case] density: f64,
    ) {
        for seed in 0..25 {
            let level = random_level(seed, width, height, density);
            let once = normalize(&level);
            assert_eq!(normalize(&once), once, "seed {}", seed);
            assert!(once.validate().is_ok());
            assert!(once.width() >= 1 && once.height() >= 1);
            assert!(once.width() <= width.max(1));
            assert!(once.height() <= height.max(1));
            if !level.is_blank() {
                assert!(once.rows().iter().all(|row| !is_blank(row)));
            }
        }
    }
}
