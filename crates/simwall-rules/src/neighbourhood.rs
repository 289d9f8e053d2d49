//! Moore-neighbourhood counting shared by the life-like rules.
//!
//! Edges are hard: neighbours that fall off the grid do not exist, so
//! corner cells have 3 neighbours and edge cells 5.

use simwall_core::cell::ALIVE;
use simwall_core::{Cell, EdgeBehavior, Grid, GridError};

/// All 8 offsets as `(dx, dy)`: N, S, W, E, NW, NE, SW, SE.
const OFFSETS_8: [(i64, i64); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Number of [`ALIVE`] cells among the 8 neighbours of `(x, y)`.
///
/// Cells in any other state, including Brian's Brain's dying state, do not
/// count.
pub fn live_neighbours(grid: &Grid, x: u32, y: u32) -> u8 {
    let (w, h) = (grid.width(), grid.height());
    let cells = grid.cells();
    let mut count = 0;
    for (dx, dy) in OFFSETS_8 {
        let nx = EdgeBehavior::Absorb.resolve(i64::from(x) + dx, w);
        let ny = EdgeBehavior::Absorb.resolve(i64::from(y) + dy, h);
        if let (Some(nx), Some(ny)) = (nx, ny) {
            if cells[ny as usize * w as usize + nx as usize] == ALIVE {
                count += 1;
            }
        }
    }
    count
}

/// Apply a per-cell transition to every cell of `grid`.
///
/// `transition(cell, live_neighbours)` returns the next value, or `None`
/// when `cell` is not a valid tag for the automaton. The first such cell
/// aborts the step with [`GridError::TagOutOfRange`].
pub(crate) fn step_cells<F>(grid: &Grid, states: u8, transition: F) -> Result<Grid, GridError>
where
    F: Fn(Cell, u8) -> Option<Cell>,
{
    let w = grid.width();
    let mut next = Grid::empty(grid.dims());
    for (index, (&cell, out)) in grid
        .cells()
        .iter()
        .zip(next.cells_mut().iter_mut())
        .enumerate()
    {
        let x = (index % w as usize) as u32;
        let y = (index / w as usize) as u32;
        *out = transition(cell, live_neighbours(grid, x, y)).ok_or(GridError::TagOutOfRange {
            index,
            value: cell,
            states,
        })?;
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simwall_core::cell::DYING;

    #[test]
    fn corners_see_three_neighbours() {
        let g = Grid::from_rows(&[vec![1, 1, 1], vec![1, 1, 1], vec![1, 1, 1]]).unwrap();
        assert_eq!(live_neighbours(&g, 0, 0), 3);
        assert_eq!(live_neighbours(&g, 2, 2), 3);
        assert_eq!(live_neighbours(&g, 1, 0), 5);
        assert_eq!(live_neighbours(&g, 1, 1), 8);
    }

    #[test]
    fn edges_do_not_wrap() {
        let g = Grid::from_rows(&[vec![0, 0, 1], vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
        assert_eq!(live_neighbours(&g, 0, 0), 0);
        assert_eq!(live_neighbours(&g, 0, 2), 0);
    }

    #[test]
    fn dying_cells_are_not_counted() {
        let g = Grid::from_rows(&[vec![DYING, ALIVE], vec![DYING, 0]]).unwrap();
        assert_eq!(live_neighbours(&g, 1, 1), 1);
    }

    #[test]
    fn step_cells_reports_bad_tag() {
        let g = Grid::from_rows(&[vec![0, 7]]).unwrap();
        let err = step_cells(&g, 2, |c, _| (c < 2).then_some(c)).unwrap_err();
        assert_eq!(
            err,
            GridError::TagOutOfRange {
                index: 1,
                value: 7,
                states: 2
            }
        );
    }
}
