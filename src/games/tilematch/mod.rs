//! Tile-match engine: a shuffled deck of symbol pairs, revealed two at a
//! time, with host-timed flip-backs for mismatches.

pub mod game;
pub mod tile;

pub use game::{
    FlipBackOutcome, FlipBackToken, PairHint, RevealError, RevealOutcome, TileMatchConfig,
    TileMatchGame, TileMatchSnapshot, TileView, FLIP_BACK_DELAY, WIN_XP,
};
pub use tile::SymbolId;
