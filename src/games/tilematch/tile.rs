//! Tiles and deck construction.

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Identifies one of the paired symbols in a deck.
///
/// The engine deals in symbol identities; the host maps them to glyphs,
/// emoji, or card faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolId(u8);

impl SymbolId {
    #[must_use]
    pub fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for SymbolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

/// One tile on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Tile {
    pub(crate) symbol: SymbolId,
    pub(crate) face_up: bool,
    pub(crate) matched: bool,
}

impl Tile {
    pub(crate) fn new(symbol: SymbolId) -> Self {
        Self {
            symbol,
            face_up: false,
            matched: false,
        }
    }
}

/// Deal a shuffled deck holding every symbol exactly twice.
pub(crate) fn build_deck(symbol_count: u8, rng: &mut GameRng) -> Vec<Tile> {
    let mut deck: Vec<Tile> = (0..symbol_count)
        .flat_map(|s| {
            let symbol = SymbolId::new(s);
            [Tile::new(symbol), Tile::new(symbol)]
        })
        .collect();
    rng.shuffle(&mut deck);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn test_deck_holds_every_symbol_twice() {
        let mut rng = GameRng::new(42);
        let deck = build_deck(8, &mut rng);

        assert_eq!(deck.len(), 16);

        let mut counts: FxHashMap<SymbolId, usize> = FxHashMap::default();
        for tile in &deck {
            *counts.entry(tile.symbol).or_default() += 1;
            assert!(!tile.face_up);
            assert!(!tile.matched);
        }
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_deck_is_seed_deterministic() {
        let mut rng1 = GameRng::new(7);
        let mut rng2 = GameRng::new(7);

        assert_eq!(build_deck(8, &mut rng1), build_deck(8, &mut rng2));
    }

    #[test]
    fn test_empty_deck() {
        let mut rng = GameRng::new(1);
        assert!(build_deck(0, &mut rng).is_empty());
    }
}
