use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Grid dimensions must be positive, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Grid of {rows}x{cols} cells does not fit in memory")]
    TooLarge { rows: usize, cols: usize },

    #[error("Failed to allocate cell buffers: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("Cell ({row}, {col}) is outside of the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

impl GridError {
    /// Whether this error came from constructing a grid, as opposed to addressing a cell of one.
    pub fn is_allocation(&self) -> bool {
        !matches!(self, GridError::OutOfBounds { .. })
    }
}

/// Offsets of the Moore neighborhood, `(d_row, d_col)`.
const NEIGHBORHOOD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A toroidal field of binary cells, double buffered.
///
/// Both buffers are stored row-major in one contiguous `Vec`, so cell `(row, col)` lives at
/// `row * cols + col`. The `front` buffer is the one readers see. The `back` buffer is scratch
/// space for [`Grid::step`], and the two trade places once a step is complete.
pub struct Grid {
    rows: usize,
    cols: usize,

    /// The current generation
    front: Vec<bool>,

    /// The next generation, only meaningful during a step
    back: Vec<bool>,
}

impl Grid {
    /// Create a grid of `rows` by `cols` dead cells.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions { rows, cols });
        }

        let Some(len) = rows.checked_mul(cols) else {
            return Err(GridError::TooLarge { rows, cols });
        };

        Ok(Self {
            rows,
            cols,
            front: Self::buffer(len)?,
            back: Self::buffer(len)?,
        })
    }

    fn buffer(len: usize) -> Result<Vec<bool>, GridError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)?;
        buf.resize(len, false);

        Ok(buf)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns whether the cell at `(row, col)` is alive in the current generation.
    pub fn get(&self, row: usize, col: usize) -> Result<bool, GridError> {
        let i = self.index(row, col)?;

        Ok(self.front[i])
    }

    /// Sets the cell at `(row, col)` in the current generation.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> Result<(), GridError> {
        let i = self.index(row, col)?;
        self.front[i] = alive;

        Ok(())
    }

    /// Iterates over the rows of the current generation, top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[bool]> {
        self.front.chunks_exact(self.cols)
    }

    /// Number of live cells in the current generation.
    pub fn population(&self) -> usize {
        self.front.iter().filter(|&&alive| alive).count()
    }

    /// Counts the live cells in the Moore neighborhood of `(row, col)`, wrapping around the edges.
    ///
    /// Every one of the eight offsets is wrapped the same way, so corners and edges need no
    /// special handling. On a grid narrower than three cells some offsets land on the same cell
    /// (possibly `(row, col)` itself), and that cell is counted once per offset.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        count_live_neighbors(&self.front, self.rows, self.cols, row, col)
    }

    /// Computes the next generation into the back buffer, then swaps the buffers.
    ///
    /// `next` receives each cell's current state and live neighbor count. Only the front buffer
    /// is read while the back buffer is written, so the update is synchronous. Returns the
    /// population of the new generation.
    pub fn step<F>(&mut self, mut next: F) -> usize
    where
        F: FnMut(bool, u8) -> bool,
    {
        let Self {
            rows,
            cols,
            front,
            back,
        } = self;

        let mut population = 0;

        for (i, cell) in back.iter_mut().enumerate() {
            let (row, col) = (i / *cols, i % *cols);
            let n = count_live_neighbors(front, *rows, *cols, row, col);

            *cell = next(front[i], n);

            if *cell {
                population += 1;
            }
        }

        std::mem::swap(&mut self.front, &mut self.back);

        population
    }

    /// Releases both buffers.
    pub fn destroy(self) {}

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        Ok(row * self.cols + col)
    }
}

/// Maps a possibly out of range coordinate onto `[0, n)`.
pub fn wrap(i: isize, n: usize) -> usize {
    i.rem_euclid(n as isize) as usize
}

fn count_live_neighbors(cells: &[bool], rows: usize, cols: usize, row: usize, col: usize) -> u8 {
    let (row, col) = (row as isize, col as isize);

    NEIGHBORHOOD
        .iter()
        .filter(|&&(dr, dc)| {
            let r = wrap(row + dr, rows);
            let c = wrap(col + dc, cols);

            cells[r * cols + c]
        })
        .count() as u8
}

/// Draws the current generation with `#` for live cells and `.` for dead ones.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
        }

        Ok(())
    }
}
