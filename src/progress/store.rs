//! Key-value persistence boundary for player progress.
//!
//! The host application owns durable storage (a mobile key-value store, a
//! file, a test fixture). Engines never touch it directly; they go through
//! a [`ProgressLedger`](crate::progress::ProgressLedger) built over this
//! trait. Values are stored as strings; the ledger owns the
//! decimal-integer encoding of counters.

use rustc_hash::FxHashMap;
use thiserror::Error;

/// A persistence operation failed at the host boundary.
///
/// Store failures are recoverable: the ledger keeps serving its in-memory
/// counters and surfaces the error to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("progress store failure on key `{key}`: {reason}")]
pub struct StoreError {
    /// The key the failed operation addressed.
    pub key: String,
    /// Host-provided description of the failure.
    pub reason: String,
}

impl StoreError {
    #[must_use]
    pub fn new(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Host-owned key-value storage for progress counters.
///
/// Writes are last-write-wins per key; there are no transactions across
/// keys. Missing keys read as `None` and callers fall back to defaults.
pub trait ProgressStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key` if present.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory [`ProgressStore`] used by tests and single-process hosts.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}
