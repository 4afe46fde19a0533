//! Persisted player progress: the store boundary and the counter ledger.
//!
//! Engines never reach for global state. Operations that award
//! experience or spend hints take `&mut ProgressLedger<S>` from the
//! caller, so hosts decide where the counters live and tests inject an
//! in-memory store.

pub mod ledger;
pub mod store;

pub use ledger::{
    keys, ManaError, ProgressLedger, XpAward, DEFAULT_HINTS, MAX_UNLOCK_LEVEL, XP_PER_LEVEL,
};
pub use store::{MemoryStore, ProgressStore, StoreError};
