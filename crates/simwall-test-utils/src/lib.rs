//! Test utilities and fixture rules for SimWall development.
//!
//! Provides well-known life patterns, temp-file writers for pattern and
//! ant definition files, and [`fixtures`] rules that misbehave on
//! purpose for exercising engine error paths.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::io::Write;

use simwall_core::{Cell, Grid};
use tempfile::NamedTempFile;

pub use fixtures::{CountingRule, FailingRule, ResizingRule};

/// Build a grid from equal-length rows of cell tags.
///
/// Panics on malformed input; intended for tests only.
pub fn grid(rows: &[&[Cell]]) -> Grid {
    Grid::from_rows(rows).expect("fixture rows must form a grid")
}

/// Horizontal blinker in the middle of a 5x5 grid.
pub fn blinker() -> Grid {
    grid(&[
        &[0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0],
        &[0, 1, 1, 1, 0],
        &[0, 0, 0, 0, 0],
        &[0, 0, 0, 0, 0],
    ])
}

/// The 3x3 glider, heading down and to the right.
pub fn glider() -> Grid {
    grid(&[&[0, 1, 0], &[0, 0, 1], &[1, 1, 1]])
}

/// A 2x2 block still life with a one-cell dead border.
pub fn block() -> Grid {
    grid(&[&[0, 0, 0, 0], &[0, 1, 1, 0], &[0, 1, 1, 0], &[0, 0, 0, 0]])
}

/// Write `contents` to a fresh temp file. The file lives as long as the
/// returned handle.
pub fn temp_file(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().expect("create temp file");
    f.write_all(contents.as_bytes()).expect("write temp file");
    f.flush().expect("flush temp file");
    f
}

/// Write `grid` as a pattern file (one digit per cell).
pub fn pattern_file(grid: &Grid) -> NamedTempFile {
    temp_file(&grid.to_string())
}

/// Write an ant definition file with a `default` palette and one line
/// per `(x, y, heading)` ant, all red.
pub fn ant_file(ruleset: &str, ants: &[(u32, u32, u8)]) -> NamedTempFile {
    let mut text = format!("{ruleset}\ndefault\n");
    for (x, y, heading) in ants {
        text.push_str(&format!("{x} {y} {heading} FF0000FF\n"));
    }
    temp_file(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_have_expected_population() {
        assert_eq!(blinker().count(1), 3);
        assert_eq!(glider().count(1), 5);
        assert_eq!(block().count(1), 4);
    }

    #[test]
    fn pattern_file_holds_digits() {
        let f = pattern_file(&glider());
        let text = std::fs::read_to_string(f.path()).unwrap();
        assert_eq!(text.lines().collect::<Vec<_>>(), ["010", "001", "111"]);
    }

    #[test]
    fn ant_file_lists_each_ant() {
        let f = ant_file("RL", &[(1, 2, 0), (3, 4, 2)]);
        let text = std::fs::read_to_string(f.path()).unwrap();
        assert_eq!(text, "RL\ndefault\n1 2 0 FF0000FF\n3 4 2 FF0000FF\n");
    }
}
