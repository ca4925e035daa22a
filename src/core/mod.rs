//! Core engine types: entities, players, configuration, RNG.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;

pub use entity::EntityId;
pub use player::{PlayerId, PlayerMap, PlayerScope, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::GameConfig;
