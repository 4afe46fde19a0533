//! Tile-match session: flip tiles two at a time, match pairs, and flip
//! mismatches back after a host-timed delay.
//!
//! ## Flip-back contract
//!
//! The engine never sleeps. A mismatched reveal returns a
//! [`FlipBackToken`]; the host schedules [`TileMatchGame::flip_back`]
//! after [`FLIP_BACK_DELAY`] on its own clock. Tokens carry the deal
//! generation, so a timer that outlives its deal is dropped as stale
//! instead of flipping tiles in a game it was never part of. Until the
//! pending pair flips back, further reveals are refused, which keeps at
//! most two unmatched tiles face up at any instant.

use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::{GameRng, SessionStatus};
use crate::games::{award_xp, spend_hint, HintError};
use crate::progress::{ProgressLedger, ProgressStore};

use super::tile::{build_deck, SymbolId, Tile};

/// Experience granted for clearing the table.
pub const WIN_XP: u64 = 50;

/// How long the host should leave a mismatched pair face up before
/// calling [`TileMatchGame::flip_back`].
pub const FLIP_BACK_DELAY: Duration = Duration::from_secs(1);

/// Session parameters.
#[derive(Clone, Debug)]
pub struct TileMatchConfig {
    /// Distinct symbols in the deck; the deck holds each twice.
    pub symbol_count: u8,
}

impl Default for TileMatchConfig {
    fn default() -> Self {
        Self { symbol_count: 8 }
    }
}

/// Authorizes the delayed flip-back of one mismatched pair.
///
/// Tokens are single-use and tied to the deal that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipBackToken {
    generation: u64,
    tiles: [usize; 2],
}

/// A reveal was refused. Nothing changed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealError {
    #[error("tile {index} is outside the deck")]
    OutOfBounds { index: usize },
    #[error("tile {index} is already matched")]
    AlreadyMatched { index: usize },
    #[error("tile {index} is already face up")]
    AlreadyFaceUp { index: usize },
    #[error("a mismatched pair is waiting to flip back")]
    PairPending,
    #[error("the session is already over")]
    SessionOver,
}

/// Outcome of an accepted reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// First tile of a pair turned face up.
    First { index: usize },
    /// Second tile matched the first; both stay face up for good.
    Matched {
        indices: [usize; 2],
        /// Every pair is now matched.
        completed: bool,
        /// Experience granted (non-zero only on completion).
        xp_awarded: u64,
    },
    /// Second tile did not match. Both stay face up and block further
    /// reveals until the host applies the token after the delay.
    Mismatched {
        indices: [usize; 2],
        token: FlipBackToken,
    },
}

/// Outcome of a flip-back attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipBackOutcome {
    /// The pending pair turned face down.
    Applied,
    /// The token came from an earlier deal or an already resolved pair;
    /// nothing changed.
    Stale,
}

/// A hint: one fully hidden pair revealed and resolved as matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairHint {
    pub indices: [usize; 2],
    pub symbol: SymbolId,
    /// Every pair is now matched.
    pub completed: bool,
    /// Experience granted (non-zero only on completion).
    pub xp_awarded: u64,
    /// Hint budget left after this reveal.
    pub hints_remaining: u32,
}

/// One rendered tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    /// The symbol, present only while the tile is face up or matched.
    pub symbol: Option<SymbolId>,
    pub face_up: bool,
    pub matched: bool,
}

/// Render-ready view of a tile-match session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMatchSnapshot {
    pub tiles: Vec<TileView>,
    pub move_count: u32,
    pub completed: bool,
}

/// A single tile-match session.
#[derive(Clone, Debug)]
pub struct TileMatchGame {
    tiles: Vec<Tile>,
    config: TileMatchConfig,
    first_pick: Option<usize>,
    pending: Option<[usize; 2]>,
    move_count: u32,
    generation: u64,
    completed: bool,
    rng: GameRng,
}

impl TileMatchGame {
    /// Deal a fresh shuffled deck.
    #[must_use]
    pub fn new(config: TileMatchConfig, seed: u64) -> Self {
        let mut rng = GameRng::new(seed);
        let tiles = build_deck(config.symbol_count, &mut rng);
        debug!(seed, tiles = tiles.len(), "tile deck dealt");

        Self {
            completed: tiles.is_empty(),
            tiles,
            config,
            first_pick: None,
            pending: None,
            move_count: 0,
            generation: 0,
            rng,
        }
    }

    /// Deal a fresh deck in place, invalidating every outstanding
    /// flip-back token from the previous deal.
    pub fn redeal(&mut self, seed: u64) {
        self.rng = GameRng::new(seed);
        self.tiles = build_deck(self.config.symbol_count, &mut self.rng);
        self.first_pick = None;
        self.pending = None;
        self.move_count = 0;
        self.completed = self.tiles.is_empty();
        self.generation += 1;
        debug!(seed, generation = self.generation, "tile deck redealt");
    }

    /// Turn the tile at `index` face up.
    ///
    /// The first reveal of a pair waits for a partner; the second either
    /// matches both tiles for good or leaves them pending a flip-back.
    /// Each completed pair of reveals counts one move.
    pub fn reveal<S: ProgressStore>(
        &mut self,
        ledger: &mut ProgressLedger<S>,
        index: usize,
    ) -> Result<RevealOutcome, RevealError> {
        if self.completed {
            return Err(RevealError::SessionOver);
        }
        if index >= self.tiles.len() {
            return Err(RevealError::OutOfBounds { index });
        }
        if self.pending.is_some() {
            return Err(RevealError::PairPending);
        }
        if self.tiles[index].matched {
            return Err(RevealError::AlreadyMatched { index });
        }
        if self.tiles[index].face_up {
            return Err(RevealError::AlreadyFaceUp { index });
        }

        self.tiles[index].face_up = true;

        let first = match self.first_pick.take() {
            None => {
                self.first_pick = Some(index);
                return Ok(RevealOutcome::First { index });
            }
            Some(first) => first,
        };

        self.move_count += 1;
        let indices = [first, index];

        if self.tiles[first].symbol == self.tiles[index].symbol {
            let (completed, xp_awarded) = self.resolve_pair(ledger, indices);
            Ok(RevealOutcome::Matched {
                indices,
                completed,
                xp_awarded,
            })
        } else {
            self.pending = Some(indices);
            let token = FlipBackToken {
                generation: self.generation,
                tiles: indices,
            };
            Ok(RevealOutcome::Mismatched { indices, token })
        }
    }

    /// Turn a pending mismatched pair face down again.
    ///
    /// Applies only when `token` belongs to the current deal and its pair
    /// is still pending; anything else is reported stale and ignored.
    pub fn flip_back(&mut self, token: FlipBackToken) -> FlipBackOutcome {
        if token.generation != self.generation || self.pending != Some(token.tiles) {
            warn!(?token, "stale flip-back token dropped");
            return FlipBackOutcome::Stale;
        }

        for i in token.tiles {
            self.tiles[i].face_up = false;
        }
        self.pending = None;
        FlipBackOutcome::Applied
    }

    /// Reveal a fully hidden pair and resolve it as matched, spending one
    /// hint. Counts no move.
    ///
    /// Only symbols with both copies face down qualify, so a hint never
    /// touches matched tiles, the player's current pick, or a pending
    /// pair.
    pub fn request_hint<S: ProgressStore>(
        &mut self,
        ledger: &mut ProgressLedger<S>,
    ) -> Result<PairHint, HintError> {
        if self.completed {
            return Err(HintError::SessionOver);
        }
        if ledger.hints_remaining() == 0 {
            return Err(HintError::NoHintsRemaining);
        }

        let mut hidden: FxHashMap<SymbolId, SmallVec<[usize; 2]>> = FxHashMap::default();
        for (i, tile) in self.tiles.iter().enumerate() {
            if !tile.face_up && !tile.matched {
                hidden.entry(tile.symbol).or_default().push(i);
            }
        }

        let mut pairs: Vec<(SymbolId, [usize; 2])> = hidden
            .into_iter()
            .filter(|(_, positions)| positions.len() == 2)
            .map(|(symbol, positions)| (symbol, [positions[0], positions[1]]))
            .collect();
        pairs.sort_by_key(|(symbol, _)| symbol.value());

        let (symbol, indices) = match self.rng.choose(&pairs) {
            Some(&pair) => pair,
            None => return Err(HintError::NoHintablePair),
        };

        let (completed, xp_awarded) = self.resolve_pair(ledger, indices);
        let hints_remaining = spend_hint(ledger);
        debug!(%symbol, "pair revealed by hint");

        Ok(PairHint {
            indices,
            symbol,
            completed,
            xp_awarded,
            hints_remaining,
        })
    }

    /// Completed pairs of reveals.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Whether every pair is matched.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Session state in the shared vocabulary. A tile-match session has
    /// no losing state.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.completed {
            SessionStatus::Won
        } else {
            SessionStatus::InProgress
        }
    }

    /// Tiles on the table.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Render-ready view of the session. Face-down tiles conceal their
    /// symbols.
    #[must_use]
    pub fn snapshot(&self) -> TileMatchSnapshot {
        let tiles = self
            .tiles
            .iter()
            .map(|tile| TileView {
                symbol: (tile.face_up || tile.matched).then_some(tile.symbol),
                face_up: tile.face_up,
                matched: tile.matched,
            })
            .collect();

        TileMatchSnapshot {
            tiles,
            move_count: self.move_count,
            completed: self.completed,
        }
    }

    /// Mark both tiles matched and settle completion.
    fn resolve_pair<S: ProgressStore>(
        &mut self,
        ledger: &mut ProgressLedger<S>,
        indices: [usize; 2],
    ) -> (bool, u64) {
        for i in indices {
            self.tiles[i].face_up = true;
            self.tiles[i].matched = true;
        }

        if self.tiles.iter().all(|t| t.matched) {
            self.completed = true;
            award_xp(ledger, WIN_XP);
            debug!(moves = self.move_count, "tile match completed");
            (true, WIN_XP)
        } else {
            (false, 0)
        }
    }
}
