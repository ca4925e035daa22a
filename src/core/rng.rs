//! Deterministic random number generation.
//!
//! Effects that pick a random minion ("give a random friendly minion +1/+1")
//! draw from the game's `GameRng`, so a game replayed from the same seed makes
//! the same choices.
//!
//! ```
//! use ccg_effects::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.pick_index(10), b.pick_index(10));
//! assert_eq!(a.pick_index(0), None);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded ChaCha8 stream.
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

    /// Pick an index in `0..len`, or `None` when there is nothing to pick.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.inner.gen_range(0..len))
        }
    }

    /// Choose a random element from a slice.
    pub fn choose<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        self.pick_index(items.len()).map(|i| items[i])
    }

    /// Get the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.pick_index(1000), rng2.pick_index(1000));
        }
    }

    #[test]
    fn test_pick_in_range() {
        let mut rng = GameRng::new(3);
        for _ in 0..50 {
            let i = rng.pick_index(4).unwrap();
            assert!(i < 4);
        }
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = [1, 2, 3, 4, 5];

        let chosen = rng.choose(&items).unwrap();
        assert!(items.contains(&chosen));

        let empty: [i32; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_state_restore() {
        let mut rng = GameRng::new(42);
        for _ in 0..100 {
            rng.pick_index(1000);
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.pick_index(1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.pick_index(1000)).collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRngState {
            seed: 42,
            word_pos: 12345,
        };
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: GameRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
