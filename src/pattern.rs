use thiserror::Error;
use tracing::debug;

use crate::engine::Engine;
use crate::grid::GridError;

/// Two 5x5 clusters that keep the standard rule busy for a long while.
const GROWTH: &str = "3obo$2bo3b3obo$2o2bobo$4bo4b2o$o2b2o3bobo$6bobobo!";

/// `(name, run-length body, home position)`. Patterns without a home are centered.
const CATALOG: &[(&str, &str, Option<(usize, usize)>)] = &[
    ("growth", GROWTH, Some((10, 35))),
    ("block", "2o$2o!", None),
    ("blinker", "3o!", None),
    ("glider", "bo$2bo$3o!", None),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("Unexpected character '{0}' in pattern")]
    UnexpectedChar(char),

    #[error("Run count {0} is not followed by a tag")]
    DanglingCount(usize),

    #[error("Run count does not fit in a usize")]
    CountOverflow,

    #[error("Pattern is missing its terminating '!'")]
    Unterminated,
}

/// A set of live cells, relative to the pattern's top left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    rows: usize,
    cols: usize,
    cells: Vec<(usize, usize)>,
    home: Option<(usize, usize)>,
}

impl Pattern {
    /// Decodes the body of a run length encoded pattern.
    ///
    /// Tags are `b` (dead), `o` (alive), `$` (end of row) and `!` (end of pattern), each
    /// optionally preceded by a run count. Whitespace is ignored.
    ///
    /// See: https://conwaylife.com/wiki/Run_Length_Encoded
    pub fn from_rle(body: &str) -> Result<Self, PatternError> {
        let mut bytes = body.as_bytes();

        let (mut row, mut col) = (0, 0);
        let mut cols = 0;
        let mut cells = Vec::new();

        loop {
            let (count, rest) = take_count(bytes)?;

            let [tag, rest @ ..] = rest else {
                return match count {
                    Some(n) => Err(PatternError::DanglingCount(n)),
                    None => Err(PatternError::Unterminated),
                };
            };
            bytes = rest;

            let n = count.unwrap_or(1);

            match *tag {
                b'b' => col += n,
                b'o' => {
                    cells.extend((col..col + n).map(|c| (row, c)));
                    col += n;
                }
                b'$' => {
                    row += n;
                    col = 0;
                }
                b'!' => break,
                w if w.is_ascii_whitespace() && count.is_none() => {}
                other => return Err(PatternError::UnexpectedChar(other as char)),
            }

            cols = cols.max(col);
        }

        Ok(Self {
            rows: row + 1,
            cols,
            cells,
            home: None,
        })
    }

    /// Looks up a pattern by name.
    pub fn named(name: &str) -> Option<Self> {
        let &(_, body, home) = CATALOG.iter().find(|(n, ..)| *n == name)?;

        // catalog entries are known good
        let pattern = Self::from_rle(body).ok()?;

        Some(Self { home, ..pattern })
    }

    /// Names of every pattern known to [`Pattern::named`].
    pub fn names() -> impl Iterator<Item = &'static str> {
        CATALOG.iter().map(|(name, ..)| *name)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    /// Where the pattern goes on a `rows` by `cols` grid when no position is given.
    pub fn origin_on(&self, rows: usize, cols: usize) -> (usize, usize) {
        self.home.unwrap_or_else(|| {
            (
                rows.saturating_sub(self.rows) / 2,
                cols.saturating_sub(self.cols) / 2,
            )
        })
    }

    /// Brings the pattern's cells to life with its top left corner at `(row, col)`.
    ///
    /// Cells that would land past an edge wrap around to the other side.
    pub fn place(&self, engine: &mut Engine, row: usize, col: usize) -> Result<(), GridError> {
        let (rows, cols) = (engine.grid().rows(), engine.grid().cols());

        debug!(row, col, cells = self.cells.len(), "placing pattern");

        let (row, col) = (row % rows, col % cols);

        for &(r, c) in &self.cells {
            let r = (row + r % rows) % rows;
            let c = (col + c % cols) % cols;

            engine.seed(r, c, true)?;
        }

        Ok(())
    }
}

/// Reads an optional decimal run count.
fn take_count(bytes: &[u8]) -> Result<(Option<usize>, &[u8]), PatternError> {
    let len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return Ok((None, bytes));
    }

    let (digits, rest) = bytes.split_at(len);

    let mut n: usize = 0;
    for &d in digits {
        n = n
            .checked_mul(10)
            .and_then(|n| n.checked_add((d - b'0') as usize))
            .ok_or(PatternError::CountOverflow)?;
    }

    Ok((Some(n), rest))
}
