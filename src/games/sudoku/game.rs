//! Constraint-grid session: board generation, digit entry, whole-board
//! validation, candidate hints, and level unlocks.
//!
//! ## Generation
//!
//! Boards start from the base pattern `(3*(r % 3) + r/3 + c) % 9`, which
//! is valid by construction. Row and column orders are then shuffled with
//! bands kept together, digits are relabeled through a shuffled
//! permutation, and clues are carved away by difficulty. Every generated
//! board therefore has at least one solution without any search.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::GameRng;
use crate::games::{award_xp, spend_hint, HintError};
use crate::progress::{ProgressLedger, ProgressStore, MAX_UNLOCK_LEVEL};

use super::board::{Grid, GroupRef, BOX, CELLS, SIZE};

/// Experience granted for completing a board.
pub const SOLVE_XP: u64 = 100;

/// Clues left on a fresh board at the given difficulty level.
///
/// Level 1 keeps 79 clues; level 20 keeps 41. Levels outside `1..=20`
/// are clamped.
#[must_use]
pub fn clue_count(level: u8) -> u8 {
    let level = u32::from(level.clamp(1, MAX_UNLOCK_LEVEL));
    (CELLS as u32 - level * 40 / 20) as u8
}

/// The requested level is beyond the unlock frontier.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("level {level} is locked; highest unlocked is {unlocked}")]
pub struct LevelLocked {
    pub level: u8,
    pub unlocked: u8,
}

/// A cell selection was refused. The selection is unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectError {
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },
    #[error("cell ({row}, {col}) is a given clue")]
    GivenCell { row: usize, col: usize },
}

/// A digit entry was refused. The board is unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryError {
    #[error("no cell is selected")]
    NoCellSelected,
    #[error("digit must be 1 through 9, got {digit}")]
    DigitOutOfRange { digit: u8 },
}

/// The submitted board was refused. Every entry is preserved so the
/// player can keep editing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckError {
    #[error("{group} does not hold one through nine exactly once")]
    InvalidSolution { group: GroupRef },
}

/// Outcome of an accepted solution check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Experience granted by this completion (zero when re-checking an
    /// already completed board).
    pub xp_awarded: u64,
    /// Level opened by this completion, if it moved the frontier.
    pub unlocked_level: Option<u8>,
}

/// A hint fill: one empty cell filled with a legal candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridHint {
    pub row: usize,
    pub col: usize,
    pub digit: u8,
    /// Hint budget left after this fill.
    pub hints_remaining: u32,
}

/// One rendered cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    /// Current digit, `0` when empty.
    pub digit: u8,
    /// Part of the initial clue set, not editable.
    pub given: bool,
    /// Currently selected for input.
    pub selected: bool,
}

/// Render-ready view of a constraint-grid session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuSnapshot {
    /// All 81 cells, row-major.
    pub cells: Vec<CellView>,
    pub level: u8,
    pub solved: bool,
}

/// A single constraint-grid session.
#[derive(Clone, Debug)]
pub struct SudokuGame {
    solution: Grid,
    board: Grid,
    givens: Grid,
    level: u8,
    selected: Option<(usize, usize)>,
    solved: bool,
    rng: GameRng,
}

impl SudokuGame {
    /// Start a session at `level`, refusing levels beyond the unlock
    /// frontier.
    pub fn start<S: ProgressStore>(
        level: u8,
        seed: u64,
        ledger: &ProgressLedger<S>,
    ) -> Result<Self, LevelLocked> {
        let unlocked = ledger.unlocked_level();
        if level > unlocked {
            return Err(LevelLocked { level, unlocked });
        }
        Ok(Self::generate(level, seed))
    }

    /// Generate a board at `level` without consulting the unlock
    /// frontier. Levels outside `1..=20` are clamped.
    #[must_use]
    pub fn generate(level: u8, seed: u64) -> Self {
        let level = level.clamp(1, MAX_UNLOCK_LEVEL);
        let mut rng = GameRng::new(seed);

        let rows = banded_order(&mut rng);
        let cols = banded_order(&mut rng);
        let labels = rng.shuffled(&[1u8, 2, 3, 4, 5, 6, 7, 8, 9]);

        let mut solution = Grid::empty();
        for r in 0..SIZE {
            for c in 0..SIZE {
                let pattern = (BOX * (rows[r] % BOX) + rows[r] / BOX + cols[c]) % SIZE;
                solution.set(r, c, labels[pattern]);
            }
        }

        let mut board = solution.clone();
        let mut order: Vec<usize> = (0..CELLS).collect();
        rng.shuffle(&mut order);
        let to_clear = CELLS - clue_count(level) as usize;
        for &i in &order[..to_clear] {
            board.set(i / SIZE, i % SIZE, 0);
        }
        let givens = board.clone();

        debug!(seed, level, clues = board.filled_count(), "grid generated");

        Self {
            solution,
            board,
            givens,
            level,
            selected: None,
            solved: false,
            rng,
        }
    }

    /// Select the cell digits will be entered into. Given clues cannot be
    /// selected.
    pub fn select_cell(&mut self, row: usize, col: usize) -> Result<(), SelectError> {
        if row >= SIZE || col >= SIZE {
            return Err(SelectError::OutOfBounds { row, col });
        }
        if self.givens.get(row, col) != 0 {
            return Err(SelectError::GivenCell { row, col });
        }
        self.selected = Some((row, col));
        Ok(())
    }

    /// Write a digit into the selected cell, overwriting any earlier
    /// entry. No constraint is checked at entry time.
    pub fn enter_digit(&mut self, digit: u8) -> Result<(), EntryError> {
        let (row, col) = self.selected.ok_or(EntryError::NoCellSelected)?;
        if digit == 0 || digit as usize > SIZE {
            return Err(EntryError::DigitOutOfRange { digit });
        }
        self.board.set(row, col, digit);
        Ok(())
    }

    /// Validate the whole board: every row, column, and box must hold the
    /// digits one through nine exactly once.
    ///
    /// The first completion awards experience and may advance the unlock
    /// frontier; re-checking a completed board reports zero for both.
    pub fn check_solution<S: ProgressStore>(
        &mut self,
        ledger: &mut ProgressLedger<S>,
    ) -> Result<SolveReport, CheckError> {
        if let Some(group) = self.board.first_violation() {
            return Err(CheckError::InvalidSolution { group });
        }
        if self.solved {
            return Ok(SolveReport {
                xp_awarded: 0,
                unlocked_level: None,
            });
        }

        self.solved = true;
        self.selected = None;
        award_xp(ledger, SOLVE_XP);

        let before = ledger.unlocked_level();
        let unlocked_level = match ledger.advance_unlock(self.level) {
            Ok(unlocked) => unlocked,
            Err(err) => {
                warn!(error = %err, "unlock advance not persisted");
                let after = ledger.unlocked_level();
                (after > before).then_some(after)
            }
        };
        debug!(level = self.level, ?unlocked_level, "grid solved");

        Ok(SolveReport {
            xp_awarded: SOLVE_XP,
            unlocked_level,
        })
    }

    /// Fill a random empty cell with a random legal candidate, spending
    /// one hint.
    ///
    /// Rejects with the budget untouched when no empty cell remains or
    /// the chosen cell admits no digit.
    pub fn request_hint<S: ProgressStore>(
        &mut self,
        ledger: &mut ProgressLedger<S>,
    ) -> Result<GridHint, HintError> {
        if ledger.hints_remaining() == 0 {
            return Err(HintError::NoHintsRemaining);
        }

        let open = self.board.empty_cells();
        let (row, col) = match self.rng.choose(&open) {
            Some(&cell) => cell,
            None => return Err(HintError::NothingToHint),
        };

        let candidates = self.board.candidates(row, col);
        let digit = match self.rng.choose(&candidates) {
            Some(&d) => d,
            None => return Err(HintError::NoCandidates),
        };

        self.board.set(row, col, digit);
        let hints_remaining = spend_hint(ledger);
        debug!(row, col, "cell filled by hint");

        Ok(GridHint {
            row,
            col,
            digit,
            hints_remaining,
        })
    }

    /// Difficulty level of this board.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Whether the board has passed a solution check.
    #[must_use]
    pub fn solved(&self) -> bool {
        self.solved
    }

    /// The cell currently selected for input.
    #[must_use]
    pub fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    /// The board as currently filled.
    #[must_use]
    pub fn board(&self) -> &Grid {
        &self.board
    }

    /// The initial clue set.
    #[must_use]
    pub fn givens(&self) -> &Grid {
        &self.givens
    }

    /// The generated solution. Hosts use it for reveal-on-give-up.
    #[must_use]
    pub fn solution(&self) -> &Grid {
        &self.solution
    }

    /// Render-ready view of the session.
    #[must_use]
    pub fn snapshot(&self) -> SudokuSnapshot {
        let cells = (0..CELLS)
            .map(|i| {
                let (r, c) = (i / SIZE, i % SIZE);
                CellView {
                    digit: self.board.get(r, c),
                    given: self.givens.get(r, c) != 0,
                    selected: self.selected == Some((r, c)),
                }
            })
            .collect();

        SudokuSnapshot {
            cells,
            level: self.level,
            solved: self.solved,
        }
    }
}

/// Line order with bands shuffled as units and the three lines inside
/// each band shuffled independently. Keeping bands together preserves
/// box validity.
fn banded_order(rng: &mut GameRng) -> Vec<usize> {
    let mut order = Vec::with_capacity(SIZE);
    for &band in &rng.shuffled(&[0usize, 1, 2]) {
        for &offset in &rng.shuffled(&[0usize, 1, 2]) {
            order.push(band * BOX + offset);
        }
    }
    order
}
