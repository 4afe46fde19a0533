//! The 9×9 grid: cell storage, group iteration, and validation.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Cells per side of the grid.
pub const SIZE: usize = 9;

/// Cells per side of a box.
pub const BOX: usize = 3;

/// Total cells in the grid.
pub const CELLS: usize = SIZE * SIZE;

/// One group of nine cells that must hold the digits one through nine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupRef {
    Row(usize),
    Column(usize),
    Box(usize),
}

impl std::fmt::Display for GroupRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupRef::Row(r) => write!(f, "row {r}"),
            GroupRef::Column(c) => write!(f, "column {c}"),
            GroupRef::Box(b) => write!(f, "box {b}"),
        }
    }
}

/// A serialized grid did not hold exactly [`CELLS`] cells.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("grid must hold exactly {CELLS} cells, got {0}")]
pub struct GridLengthError(pub usize);

/// A 9×9 digit grid, row-major, with `0` marking an empty cell.
///
/// Coordinates are `(row, col)` with both in `0..SIZE`. Serializes as a
/// flat sequence of 81 cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<u8>", try_from = "Vec<u8>")]
pub struct Grid {
    cells: [u8; CELLS],
}

impl From<Grid> for Vec<u8> {
    fn from(grid: Grid) -> Self {
        grid.cells.to_vec()
    }
}

impl TryFrom<Vec<u8>> for Grid {
    type Error = GridLengthError;

    fn try_from(cells: Vec<u8>) -> Result<Self, Self::Error> {
        let cells = <[u8; CELLS]>::try_from(cells).map_err(|v: Vec<u8>| GridLengthError(v.len()))?;
        Ok(Self { cells })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    /// An all-empty grid.
    #[must_use]
    pub fn empty() -> Self {
        Self { cells: [0; CELLS] }
    }

    /// The digit at `(row, col)`, `0` when empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * SIZE + col]
    }

    /// Write `digit` at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, digit: u8) {
        self.cells[row * SIZE + col] = digit;
    }

    /// Row-major view of all cells.
    #[must_use]
    pub fn cells(&self) -> &[u8; CELLS] {
        &self.cells
    }

    /// The digits of row `r`, left to right.
    pub fn row(&self, r: usize) -> impl Iterator<Item = u8> + '_ {
        (0..SIZE).map(move |c| self.get(r, c))
    }

    /// The digits of column `c`, top to bottom.
    pub fn column(&self, c: usize) -> impl Iterator<Item = u8> + '_ {
        (0..SIZE).map(move |r| self.get(r, c))
    }

    /// The digits of box `b`, reading order. Boxes number left to right,
    /// top to bottom.
    pub fn box_group(&self, b: usize) -> impl Iterator<Item = u8> + '_ {
        let top = (b / BOX) * BOX;
        let left = (b % BOX) * BOX;
        (0..SIZE).map(move |i| self.get(top + i / BOX, left + i % BOX))
    }

    /// Coordinates of every empty cell, reading order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        (0..CELLS)
            .filter(|i| self.cells[*i] == 0)
            .map(|i| (i / SIZE, i % SIZE))
            .collect()
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&d| d != 0).count()
    }

    /// Digits that `(row, col)` could legally take given its row, column,
    /// and box. The cell's own current digit is ignored only if empty;
    /// callers hint on empty cells.
    #[must_use]
    pub fn candidates(&self, row: usize, col: usize) -> SmallVec<[u8; SIZE]> {
        let mut used = [false; SIZE + 1];
        for d in self.row(row).chain(self.column(col)) {
            if d != 0 {
                used[d as usize] = true;
            }
        }
        let b = (row / BOX) * BOX + col / BOX;
        for d in self.box_group(b) {
            if d != 0 {
                used[d as usize] = true;
            }
        }
        (1..=SIZE as u8).filter(|&d| !used[d as usize]).collect()
    }

    /// The first group that is not exactly the digits one through nine,
    /// scanning rows, then columns, then boxes.
    #[must_use]
    pub fn first_violation(&self) -> Option<GroupRef> {
        for r in 0..SIZE {
            if !group_complete(self.row(r)) {
                return Some(GroupRef::Row(r));
            }
        }
        for c in 0..SIZE {
            if !group_complete(self.column(c)) {
                return Some(GroupRef::Column(c));
            }
        }
        for b in 0..SIZE {
            if !group_complete(self.box_group(b)) {
                return Some(GroupRef::Box(b));
            }
        }
        None
    }

    /// Whether every group holds the digits one through nine exactly once.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.first_violation().is_none()
    }
}

/// Whether nine digits are exactly one through nine, each once.
fn group_complete(digits: impl Iterator<Item = u8>) -> bool {
    let mut seen = [false; SIZE];
    for d in digits {
        if d == 0 || d as usize > SIZE || seen[d as usize - 1] {
            return false;
        }
        seen[d as usize - 1] = true;
    }
    true
}
