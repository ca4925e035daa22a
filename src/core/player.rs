//! Player identification, per-player storage and player selectors.
//!
//! ## PlayerId
//!
//! The engine models a two-seat game: every player has exactly one opponent.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by a `Vec`, indexed by `PlayerId`.
//!
//! ## PlayerScope
//!
//! Effects that reach beyond their own minion ("all friendly minions",
//! "both players' spells") name the players they affect relative to the
//! effect's owner: `friendly`, `enemy` or `both`.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::ConfigError;

/// Number of seats at the table.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier. `PlayerId(0)` moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    ///
    /// ```
    /// use ccg_effects::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(0).opponent(), PlayerId::new(1));
    /// assert_eq!(PlayerId::new(1).opponent(), PlayerId::new(0));
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self((self.0 + 1) % PLAYER_COUNT as u8)
    }

    /// Iterate over both player IDs in seat order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a map with one value per seat from a factory.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::all().map(factory).collect(),
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// Which players an effect reaches, relative to its owner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerScope {
    /// The owner only.
    #[default]
    Friendly,
    /// The owner's opponent only.
    Enemy,
    /// Owner first, then opponent.
    Both,
}

impl PlayerScope {
    /// Resolve the scope for an owner, in owner-first order.
    #[must_use]
    pub fn resolve(self, owner: PlayerId) -> SmallVec<[PlayerId; 2]> {
        match self {
            PlayerScope::Friendly => smallvec![owner],
            PlayerScope::Enemy => smallvec![owner.opponent()],
            PlayerScope::Both => smallvec![owner, owner.opponent()],
        }
    }

    /// The option string used in effect definitions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PlayerScope::Friendly => "friendly",
            PlayerScope::Enemy => "enemy",
            PlayerScope::Both => "both",
        }
    }
}

impl FromStr for PlayerScope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "friendly" => Ok(PlayerScope::Friendly),
            "enemy" => Ok(PlayerScope::Enemy),
            "both" => Ok(PlayerScope::Both),
            other => Err(ConfigError::InvalidPlayers(other.to_string())),
        }
    }
}

impl std::fmt::Display for PlayerScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
