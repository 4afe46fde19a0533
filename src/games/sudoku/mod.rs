//! Constraint-grid engine: procedurally generated 9×9 boards where every
//! row, column, and box must hold the digits one through nine.

pub mod board;
pub mod game;

pub use board::{Grid, GridLengthError, GroupRef, BOX, CELLS, SIZE};
pub use game::{
    clue_count, CellView, CheckError, EntryError, GridHint, LevelLocked, SelectError,
    SolveReport, SudokuGame, SudokuSnapshot, SOLVE_XP,
};
