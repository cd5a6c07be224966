//! Deterministic random number generation for replayable combats.
//!
//! ## Key Features
//!
//! - **Deterministic**: the same seed produces the identical combat, so a
//!   recorded snapshot stream can be replayed bit-for-bit in tests.
//! - **Serializable**: O(1) state capture via the ChaCha8 word position,
//!   independent of how many values have been drawn.
//!
//! Randomness in this core is deliberately narrow: deck shuffling at
//! `StartCombat` and the built-in opponent's card choice. Damage
//! resolution never consults the RNG.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic per-combat RNG.
///
/// Uses ChaCha8 for speed while maintaining high-quality randomness.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "CombatRngState", into = "CombatRngState")]
pub struct CombatRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl CombatRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a mutable slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose the index of a random element, or `None` if `len` is zero.
    #[must_use]
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.inner.gen_range(0..len))
        }
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> CombatRngState {
        CombatRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &CombatRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses the ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

impl From<CombatRngState> for CombatRng {
    fn from(state: CombatRngState) -> Self {
        CombatRng::from_state(&state)
    }
}

impl From<CombatRng> for CombatRngState {
    fn from(rng: CombatRng) -> Self {
        rng.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = CombatRng::new(42);
        let mut rng2 = CombatRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = CombatRng::new(1);
        let mut rng2 = CombatRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let mut rng1 = CombatRng::new(7);
        let mut rng2 = CombatRng::new(7);

        let mut deck1: Vec<u32> = (0..30).collect();
        let mut deck2: Vec<u32> = (0..30).collect();
        rng1.shuffle(&mut deck1);
        rng2.shuffle(&mut deck2);

        assert_eq!(deck1, deck2);

        let mut sorted = deck1.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_choose_index() {
        let mut rng = CombatRng::new(42);

        assert_eq!(rng.choose_index(0), None);
        for _ in 0..50 {
            let chosen = rng.choose_index(5).unwrap();
            assert!(chosen < 5);
        }
    }

    #[test]
    fn test_state_round_trip() {
        let mut rng = CombatRng::new(42);
        for _ in 0..17 {
            rng.gen_range_usize(0..1000);
        }

        let state = rng.state();
        let mut restored = CombatRng::from_state(&state);

        for _ in 0..10 {
            assert_eq!(
                rng.gen_range_usize(0..1000),
                restored.gen_range_usize(0..1000)
            );
        }
    }
}
