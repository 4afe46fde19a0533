//! # brainbox
//!
//! Procedural puzzle engines (word guess, constraint grid, tile match)
//! sharing a persisted progress ledger.
//!
//! ## Design Principles
//!
//! 1. **Engine, Not App**: No rendering, no timers, no storage. Engines
//!    expose snapshots for the host to draw, tokens for the host to
//!    schedule, and a store trait for the host to implement.
//!
//! 2. **Deterministic**: Every session is seeded. The same seed replays
//!    the same target word, board, or deck, so any bug report can be
//!    reproduced from its logged seed.
//!
//! 3. **Rejections Are Values**: Every operation that can be refused
//!    returns a typed error and leaves the session untouched. Nothing
//!    panics, nothing silently no-ops.
//!
//! ## Architecture
//!
//! - **Injected Progress**: Operations that award experience or spend
//!   hints take a `ProgressLedger` from the caller. The ledger writes
//!   through to a host-owned key-value store, last-write-wins per key.
//!
//! - **Host-Timed Flip-Backs**: The tile-match engine hands out
//!   generation-tagged tokens instead of sleeping; a timer that outlives
//!   its deal is dropped as stale.
//!
//! ## Modules
//!
//! - `core`: Deterministic RNG, shared session vocabulary
//! - `progress`: Store boundary, counter ledger, experience and unlocks
//! - `games::wordguess`: Hidden word, positional feedback, eliminated letters
//! - `games::sudoku`: Generated 9×9 boards, validation, candidate hints
//! - `games::tilematch`: Paired deck, flip/match machine, flip-back tokens

pub mod core;
pub mod games;
pub mod progress;

// Re-export commonly used types
pub use crate::core::{GameRng, SessionStatus};

pub use crate::progress::{
    ManaError, MemoryStore, ProgressLedger, ProgressStore, StoreError, XpAward,
};

pub use crate::games::HintError;

pub use crate::games::wordguess::{
    GuessError, GuessFeedback, GuessReport, HintReveal, LetterMark, WordGuessConfig,
    WordGuessGame, WordGuessSnapshot,
};

pub use crate::games::sudoku::{
    CellView, CheckError, EntryError, Grid, GridHint, GridLengthError, GroupRef, LevelLocked,
    SelectError, SolveReport, SudokuGame, SudokuSnapshot,
};

pub use crate::games::tilematch::{
    FlipBackOutcome, FlipBackToken, PairHint, RevealError, RevealOutcome, SymbolId,
    TileMatchConfig, TileMatchGame, TileMatchSnapshot, TileView,
};
