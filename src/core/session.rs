//! Shared session vocabulary used by every puzzle engine.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a puzzle session.
///
/// Sessions start `InProgress` and move to exactly one terminal state.
/// Terminal sessions refuse further moves; callers start a new session
/// instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Moves are still accepted.
    InProgress,
    /// The puzzle was completed successfully.
    Won,
    /// The attempt budget ran out before completion.
    Lost,
}

impl SessionStatus {
    /// Whether the session has reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionStatus::InProgress)
    }
}
