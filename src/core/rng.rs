//! Deterministic random number generation for puzzle sessions.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Seed tracking**: Every session can log its seed for replay
//! - **Uniform shuffles**: Fisher-Yates via `rand`, in-place or copying
//!
//! ## Usage
//!
//! ```
//! use brainbox::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let deck = rng.shuffled(&[1, 2, 3, 4]);
//!
//! // Same seed replays the same session
//! let mut replay = GameRng::new(42);
//! assert_eq!(deck, replay.shuffled(&[1, 2, 3, 4]));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG behind every puzzle session.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality randomness.
/// Sessions are constructed with an explicit seed in tests and with
/// [`GameRng::from_entropy`] in production, so any board or deck can be
/// reproduced from its logged seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG from OS entropy, keeping the seed loggable.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was constructed with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Return a uniformly shuffled copy, leaving the input untouched.
    ///
    /// Empty and single-element inputs pass through unchanged.
    #[must_use]
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut out = items.to_vec();
        self.shuffle(&mut out);
        out
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_shuffled_leaves_input_untouched() {
        let mut rng = GameRng::new(42);
        let items = vec!["a", "b", "c", "d", "e"];

        let out = rng.shuffled(&items);

        assert_eq!(items, vec!["a", "b", "c", "d", "e"]);
        let mut sorted = out.clone();
        sorted.sort();
        assert_eq!(sorted, items);
    }

    #[test]
    fn test_shuffled_trivial_inputs() {
        let mut rng = GameRng::new(7);

        let empty: Vec<i32> = vec![];
        assert_eq!(rng.shuffled(&empty), empty);

        assert_eq!(rng.shuffled(&[99]), vec![99]);
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(chosen.is_some());
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_from_entropy_differs() {
        let mut rng1 = GameRng::from_entropy();
        let mut rng2 = GameRng::from_entropy();

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1_000_000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1_000_000)).collect();

        assert_ne!(seq1, seq2);
    }
}
