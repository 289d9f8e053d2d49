//! Grid dimensions and the row-major cell buffer.

use std::fmt;

use rand::Rng;

use crate::cell::{Cell, ALIVE, DEAD};
use crate::error::GridError;

/// Side length of the square block seeded by [`Grid::small_random`].
const SMALL_BLOCK: u32 = 7;

/// Validated grid dimensions.
///
/// Both axes are at least 1 and at most [`Dims::MAX_DIM`], so coordinate
/// arithmetic in `i64` and flat indexing in `usize` never overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dims {
    width: u32,
    height: u32,
}

impl Dims {
    /// Largest accepted width or height.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Returns `Err(GridError::EmptyGrid)` if either dimension is 0, or
    /// `Err(GridError::DimensionTooLarge)` if either exceeds [`Self::MAX_DIM`].
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        if width > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                name: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(self) -> u32 {
        self.height
    }

    /// `width * height`.
    pub fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major flat index of `(x, y)`, or `None` if out of bounds.
    pub fn index(self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Centre cell, rounding down on even axes.
    pub fn center(self) -> (u32, u32) {
        (self.width / 2, self.height / 2)
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn contains(self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A `width x height` lattice of cells stored row-major.
///
/// Cell `(x, y)` lives at index `y * width + x`. The buffer length always
/// equals `width * height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dims: Dims,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-dead grid.
    pub fn empty(dims: Dims) -> Self {
        Self {
            dims,
            cells: vec![DEAD; dims.cell_count()],
        }
    }

    /// Wrap an existing row-major buffer.
    pub fn from_cells(dims: Dims, cells: Vec<Cell>) -> Result<Self, GridError> {
        if cells.len() != dims.cell_count() {
            return Err(GridError::SizeMismatch {
                expected: dims.cell_count(),
                actual: cells.len(),
            });
        }
        Ok(Self { dims, cells })
    }

    /// Build from rows of possibly unequal length.
    ///
    /// The width is the longest row; shorter rows are padded with
    /// [`DEAD`]. Fails with [`GridError::EmptyGrid`] if there are no rows
    /// or every row is empty.
    pub fn from_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<Self, GridError> {
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let width = u32::try_from(width).map_err(|_| GridError::DimensionTooLarge {
            name: "width",
            value: u32::MAX,
            max: Dims::MAX_DIM,
        })?;
        let height = u32::try_from(rows.len()).map_err(|_| GridError::DimensionTooLarge {
            name: "height",
            value: u32::MAX,
            max: Dims::MAX_DIM,
        })?;
        let dims = Dims::new(width, height)?;
        let mut cells = Vec::with_capacity(dims.cell_count());
        for row in rows {
            let row = row.as_ref();
            cells.extend_from_slice(row);
            cells.resize(cells.len() + (width as usize - row.len()), DEAD);
        }
        Ok(Self { dims, cells })
    }

    /// Every cell independently alive with probability `percent / 100`.
    ///
    /// `percent` above 100 is treated as 100.
    pub fn random_uniform<R: Rng + ?Sized>(dims: Dims, percent: u8, rng: &mut R) -> Self {
        let percent = percent.min(100);
        let cells = (0..dims.cell_count())
            .map(|_| {
                if rng.random_range(0u8..100) < percent {
                    ALIVE
                } else {
                    DEAD
                }
            })
            .collect();
        Self { dims, cells }
    }

    /// A small random seed: a 7x7 block around the centre, each cell alive
    /// with probability 1/2, clipped to the grid. Everything else is dead.
    pub fn small_random<R: Rng + ?Sized>(dims: Dims, rng: &mut R) -> Self {
        let mut grid = Self::empty(dims);
        let (cx, cy) = dims.center();
        let half = SMALL_BLOCK / 2;
        let x0 = cx.saturating_sub(half);
        let y0 = cy.saturating_sub(half);
        let x1 = (cx + half).min(dims.width - 1);
        let y1 = (cy + half).min(dims.height - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                if rng.random_bool(0.5) {
                    let i = y as usize * dims.width as usize + x as usize;
                    grid.cells[i] = ALIVE;
                }
            }
        }
        grid
    }

    /// Copy `pattern` into the middle of an empty grid of size `dims`.
    ///
    /// The top-left corner lands at `((W - pw) / 2, (H - ph) / 2)`.
    /// Fails with [`GridError::PatternTooLarge`] if the pattern is wider or
    /// taller than the grid.
    pub fn centered_from_pattern(dims: Dims, pattern: &Grid) -> Result<Self, GridError> {
        let (pw, ph) = (pattern.dims.width, pattern.dims.height);
        if pw > dims.width || ph > dims.height {
            return Err(GridError::PatternTooLarge {
                pattern_width: pw,
                pattern_height: ph,
                width: dims.width,
                height: dims.height,
            });
        }
        let col_start = ((dims.width - pw) / 2) as usize;
        let row_start = ((dims.height - ph) / 2) as usize;
        let mut grid = Self::empty(dims);
        let w = dims.width as usize;
        for (r, row) in pattern.rows().enumerate() {
            let start = (row_start + r) * w + col_start;
            grid.cells[start..start + row.len()].copy_from_slice(row);
        }
        Ok(grid)
    }

    /// Turn each dead cell alive with probability `percent / 100`.
    ///
    /// Returns the number of cells that came alive.
    pub fn sprinkle<R: Rng + ?Sized>(&mut self, percent: u8, rng: &mut R) -> usize {
        let percent = percent.min(100);
        let mut born = 0;
        for cell in self.cells.iter_mut().filter(|c| **c == DEAD) {
            if rng.random_range(0u8..100) < percent {
                *cell = ALIVE;
                born += 1;
            }
        }
        born
    }

    /// Grid dimensions.
    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.dims.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.dims.height
    }

    /// The value at `(x, y)`, or `None` if out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<Cell> {
        self.dims.index(x, y).map(|i| self.cells[i])
    }

    /// Overwrite the value at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, value: Cell) -> Result<(), GridError> {
        let i = self.dims.index(x, y).ok_or(GridError::CoordOutOfBounds {
            x,
            y,
            width: self.dims.width,
            height: self.dims.height,
        })?;
        self.cells[i] = value;
        Ok(())
    }

    /// Row-major cell slice.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable row-major cell slice. The length cannot change.
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, Cell> {
        self.cells.chunks_exact(self.dims.width as usize)
    }

    /// Reset every cell to [`DEAD`].
    pub fn clear(&mut self) {
        self.cells.fill(DEAD);
    }

    /// Number of cells holding `tag`.
    pub fn count(&self, tag: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == tag).count()
    }

    /// Fraction of cells holding `tag`, in `[0, 1]`.
    pub fn life_fraction(&self, tag: Cell) -> f64 {
        self.count(tag) as f64 / self.dims.cell_count() as f64
    }

    /// Sum of all cell values divided by the cell count.
    ///
    /// Equals `life_fraction(ALIVE)` on a two-state grid. On a Brian's
    /// Brain grid each dying cell weighs twice an alive one.
    pub fn value_density(&self) -> f64 {
        let sum: u64 = self.cells.iter().map(|&c| u64::from(c)).sum();
        sum as f64 / self.dims.cell_count() as f64
    }

    /// Check that every cell is below `states`.
    pub fn validate_tags(&self, states: u8) -> Result<(), GridError> {
        match self.cells.iter().position(|&c| c >= states) {
            None => Ok(()),
            Some(index) => Err(GridError::TagOutOfRange {
                index,
                value: self.cells[index],
                states,
            }),
        }
    }
}

/// One line per row, one character per cell: digits for values below 10,
/// then lowercase letters up to 35, `?` beyond.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row
                .iter()
                .map(|&c| char::from_digit(u32::from(c), 36).unwrap_or('?'))
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
