//! Core engine types: deterministic RNG and shared session vocabulary.
//!
//! This module contains the fundamental building blocks that are
//! puzzle-agnostic. Engines build their own state machines on top of these
//! rather than sharing a common game trait.

pub mod rng;
pub mod session;

pub use rng::GameRng;
pub use session::SessionStatus;
