//! Digit-per-cell grid pattern files.
//!
//! One row per line. Every decimal digit is one cell; any other character
//! (spaces, dots, carriage returns) is skipped and does not count as a
//! column. Rows shorter than the longest are padded with dead cells.
//! Lines without any digit, blank ones included, are skipped.

use std::fs;
use std::path::Path;

use simwall_core::{Cell, Grid};
use tracing::debug;

use crate::error::PatternError;

/// Parse pattern text into a grid sized to the pattern.
///
/// ```
/// use simwall_pattern::parse_grid;
///
/// let g = parse_grid("010\n001\n111\n").unwrap();
/// assert_eq!((g.width(), g.height()), (3, 3));
/// assert_eq!(g.get(2, 1), Some(1));
/// ```
pub fn parse_grid(text: &str) -> Result<Grid, PatternError> {
    let rows: Vec<Vec<Cell>> = text
        .lines()
        .map(|line| {
            line.chars()
                .filter_map(|c| c.to_digit(10))
                .map(|d| d as Cell)
                .collect::<Vec<Cell>>()
        })
        .filter(|row| !row.is_empty())
        .collect();
    if rows.is_empty() {
        return Err(PatternError::EmptyPattern);
    }
    Ok(Grid::from_rows(&rows)?)
}

/// Read and parse a pattern file.
pub fn load_grid_file(path: impl AsRef<Path>) -> Result<Grid, PatternError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PatternError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let grid = parse_grid(&text)?;
    debug!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        "loaded grid pattern"
    );
    Ok(grid)
}
