//! Game configuration.
//!
//! Table limits and starting resources. The effect core reads these when it
//! summons (board limit), adds cards to a hand (hand limit) or seeds the RNG.

use serde::{Deserialize, Serialize};

/// Complete game configuration.
///
/// ```
/// use ccg_effects::core::GameConfig;
///
/// let config = GameConfig::new(42).with_max_board_size(5);
/// assert_eq!(config.seed, 42);
/// assert_eq!(config.max_board_size, 5);
/// assert_eq!(config.max_hand_size, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// RNG seed.
    pub seed: u64,

    /// Minions a player may have on board at once. Extra summons are dropped.
    pub max_board_size: usize,

    /// Cards a player may hold. Effects that add cards stop at this size.
    pub max_hand_size: usize,

    /// Mana each player starts with.
    pub starting_mana: i64,

    /// Starting hero health.
    pub hero_health: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_board_size: 7,
            max_hand_size: 10,
            starting_mana: 10,
            hero_health: 30,
        }
    }
}

impl GameConfig {
    /// Create a configuration with default limits and the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Set the board limit.
    #[must_use]
    pub fn with_max_board_size(mut self, size: usize) -> Self {
        self.max_board_size = size;
        self
    }

    /// Set the hand limit.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    /// Set starting mana.
    #[must_use]
    pub fn with_starting_mana(mut self, mana: i64) -> Self {
        self.starting_mana = mana;
        self
    }

    /// Set starting hero health.
    #[must_use]
    pub fn with_hero_health(mut self, health: i64) -> Self {
        self.hero_health = health;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.max_board_size, 7);
        assert_eq!(config.max_hand_size, 10);
        assert_eq!(config.starting_mana, 10);
        assert_eq!(config.hero_health, 30);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new(9)
            .with_max_hand_size(3)
            .with_starting_mana(2)
            .with_hero_health(15);

        assert_eq!(config.seed, 9);
        assert_eq!(config.max_hand_size, 3);
        assert_eq!(config.starting_mana, 2);
        assert_eq!(config.hero_health, 15);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::new(1).with_max_board_size(4);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
