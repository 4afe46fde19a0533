//! Write-through ledger over the persisted progress counters.
//!
//! ## Counters
//!
//! - `xp`: lifetime experience; levels are derived, never stored
//! - `hintCount`: shared hint budget across all puzzle engines
//! - `sudokuProgress`: highest unlocked constraint-grid level
//! - `mana`: soft currency granted on level-ups
//!
//! The ledger reads each counter once at load, then serves reads from
//! memory and writes through on every mutation. Writes are last-write-wins
//! per key with no transactions across keys; when a write fails the
//! in-memory counter keeps its new value and the error is surfaced, so a
//! live session never observes a rollback.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::store::{ProgressStore, StoreError};

/// Experience required per level. Level is `xp / XP_PER_LEVEL + 1`.
pub const XP_PER_LEVEL: u64 = 100;

/// Highest constraint-grid level the unlock frontier can reach.
pub const MAX_UNLOCK_LEVEL: u8 = 20;

/// Hint budget granted to a fresh profile.
pub const DEFAULT_HINTS: u32 = 3;

/// Store keys owned by the ledger.
pub mod keys {
    /// Lifetime experience, decimal integer.
    pub const XP: &str = "xp";
    /// Remaining hint budget, decimal integer.
    pub const HINTS: &str = "hintCount";
    /// Highest unlocked constraint-grid level, decimal integer.
    pub const UNLOCK: &str = "sudokuProgress";
    /// Soft currency balance, decimal integer.
    pub const MANA: &str = "mana";
}

/// A mana spend was refused or failed to persist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManaError {
    #[error("not enough mana: have {have}, need {need}")]
    Insufficient { have: u64, need: u64 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of an experience award, including any levels crossed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAward {
    /// Lifetime experience after the award.
    pub total: u64,
    /// Player level after the award.
    pub level: u32,
    /// Levels gained by this award (usually 0 or 1).
    pub levels_gained: u32,
    /// Mana granted for the levels gained, one per level.
    pub mana_granted: u64,
}

/// In-memory view of the persisted progress counters, writing through to
/// a host-owned [`ProgressStore`].
///
/// Engines receive `&mut ProgressLedger` on the operations that award
/// experience or spend hints; nothing in the crate reaches for global
/// state.
#[derive(Clone, Debug)]
pub struct ProgressLedger<S: ProgressStore> {
    store: S,
    xp: u64,
    hints: u32,
    unlocked: u8,
    mana: u64,
}

impl<S: ProgressStore> ProgressLedger<S> {
    /// Load the counters from `store`, falling back to defaults for
    /// missing or malformed values.
    pub fn load(store: S) -> Result<Self, StoreError> {
        let xp = read_counter(&store, keys::XP, 0)?;
        let hints = read_counter(&store, keys::HINTS, u64::from(DEFAULT_HINTS))? as u32;
        let unlocked = read_counter(&store, keys::UNLOCK, 1)?.min(u64::from(MAX_UNLOCK_LEVEL)) as u8;
        let mana = read_counter(&store, keys::MANA, 0)?;

        debug!(xp, hints, unlocked, mana, "progress counters loaded");

        Ok(Self {
            store,
            xp,
            hints,
            unlocked,
            mana,
        })
    }

    /// Lifetime experience.
    #[must_use]
    pub fn xp(&self) -> u64 {
        self.xp
    }

    /// Player level derived from experience.
    #[must_use]
    pub fn level(&self) -> u32 {
        (self.xp / XP_PER_LEVEL) as u32 + 1
    }

    /// Remaining hint budget.
    #[must_use]
    pub fn hints_remaining(&self) -> u32 {
        self.hints
    }

    /// Soft currency balance.
    #[must_use]
    pub fn mana(&self) -> u64 {
        self.mana
    }

    /// Highest unlocked constraint-grid level.
    #[must_use]
    pub fn unlocked_level(&self) -> u8 {
        self.unlocked
    }

    /// Award experience, granting one mana per level crossed.
    ///
    /// The in-memory counters always advance; a store failure is returned
    /// after the fact and leaves them advanced.
    pub fn add_xp(&mut self, amount: u64) -> Result<XpAward, StoreError> {
        let old_level = self.level();
        self.xp = self.xp.saturating_add(amount);
        let level = self.level();
        let levels_gained = level - old_level;
        let mana_granted = u64::from(levels_gained);
        self.mana = self.mana.saturating_add(mana_granted);

        if levels_gained > 0 {
            debug!(level, mana_granted, "level up");
        }

        let award = XpAward {
            total: self.xp,
            level,
            levels_gained,
            mana_granted,
        };

        self.store.set(keys::XP, &self.xp.to_string())?;
        if mana_granted > 0 {
            self.store.set(keys::MANA, &self.mana.to_string())?;
        }
        Ok(award)
    }

    /// Spend one hint, saturating at zero.
    ///
    /// Callers gate on [`hints_remaining`](Self::hints_remaining) before
    /// offering a hint; this method only persists the decrement. Returns
    /// the budget left after the spend.
    pub fn spend_hint(&mut self) -> Result<u32, StoreError> {
        self.hints = self.hints.saturating_sub(1);
        self.store.set(keys::HINTS, &self.hints.to_string())?;
        Ok(self.hints)
    }

    /// Grant additional hints. Returns the new budget.
    pub fn grant_hints(&mut self, count: u32) -> Result<u32, StoreError> {
        self.hints = self.hints.saturating_add(count);
        self.store.set(keys::HINTS, &self.hints.to_string())?;
        Ok(self.hints)
    }

    /// Spend mana, refusing without mutation when the balance is short.
    pub fn spend_mana(&mut self, cost: u64) -> Result<u64, ManaError> {
        if self.mana < cost {
            return Err(ManaError::Insufficient {
                have: self.mana,
                need: cost,
            });
        }
        self.mana -= cost;
        self.store.set(keys::MANA, &self.mana.to_string())?;
        Ok(self.mana)
    }

    /// Advance the unlock frontier after completing `level`.
    ///
    /// Advances only when `level` is exactly the frontier and the frontier
    /// is below [`MAX_UNLOCK_LEVEL`]; replays of earlier levels and levels
    /// beyond the frontier leave it unchanged. Returns the newly unlocked
    /// level, if any.
    pub fn advance_unlock(&mut self, level: u8) -> Result<Option<u8>, StoreError> {
        if level != self.unlocked || level >= MAX_UNLOCK_LEVEL {
            return Ok(None);
        }
        self.unlocked += 1;
        debug!(unlocked = self.unlocked, "grid level unlocked");
        self.store.set(keys::UNLOCK, &self.unlocked.to_string())?;
        Ok(Some(self.unlocked))
    }

    /// Clear every counter back to its default, removing the stored keys.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.xp = 0;
        self.hints = DEFAULT_HINTS;
        self.unlocked = 1;
        self.mana = 0;
        self.store.remove(keys::XP)?;
        self.store.remove(keys::HINTS)?;
        self.store.remove(keys::UNLOCK)?;
        self.store.remove(keys::MANA)?;
        Ok(())
    }

    /// Consume the ledger and hand the store back to the host.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}

fn read_counter<S: ProgressStore>(store: &S, key: &str, default: u64) -> Result<u64, StoreError> {
    Ok(store
        .get(key)?
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default))
}
