//! The puzzle engines.
//!
//! Each engine is an independent state machine over plain data: construct
//! a session with a seed, apply moves through fallible operations, and
//! read render-ready snapshots. Operations that touch persisted counters
//! take a [`ProgressLedger`](crate::progress::ProgressLedger) from the
//! caller.

pub mod sudoku;
pub mod tilematch;
pub mod wordguess;

use thiserror::Error;
use tracing::warn;

use crate::progress::{ProgressLedger, ProgressStore};

/// Rejection taxonomy shared by every engine's hint operation.
///
/// The hint budget is one counter shared across all engines, so hosts
/// handle a single error type no matter which puzzle asked. Every
/// rejection leaves both the session and the budget untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintError {
    /// The shared hint budget is empty.
    #[error("no hints remaining")]
    NoHintsRemaining,
    /// Every letter position is already confirmed by a guess.
    #[error("every position is already confirmed")]
    NoHintNeeded,
    /// The grid has no empty cell left to fill.
    #[error("no empty cell to fill")]
    NothingToHint,
    /// The chosen cell admits no digit under the row, column, and box
    /// already in place.
    #[error("no legal candidate for the chosen cell")]
    NoCandidates,
    /// No symbol has both copies still hidden.
    #[error("no fully hidden pair to reveal")]
    NoHintablePair,
    /// The session has already ended.
    #[error("the session is already over")]
    SessionOver,
}

/// Award experience, logging instead of failing when the store write does
/// not land. Live sessions keep playing on a flaky store; the in-memory
/// ledger stays authoritative.
pub(crate) fn award_xp<S: ProgressStore>(ledger: &mut ProgressLedger<S>, amount: u64) {
    if let Err(err) = ledger.add_xp(amount) {
        warn!(error = %err, amount, "xp award not persisted");
    }
}

/// Spend one hint after the caller has verified the budget, logging a
/// failed write. Returns the budget left.
pub(crate) fn spend_hint<S: ProgressStore>(ledger: &mut ProgressLedger<S>) -> u32 {
    match ledger.spend_hint() {
        Ok(remaining) => remaining,
        Err(err) => {
            warn!(error = %err, "hint spend not persisted");
            ledger.hints_remaining()
        }
    }
}
