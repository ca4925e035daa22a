//! Error types.
//!
//! Two layers:
//! - [`ConfigError`]: an effect was authored with an option the engine does
//!   not recognize. Raised when the effect is constructed.
//! - [`EngineError`]: a game-state inconsistency raised while mutating the
//!   game. Propagates out of `publish`, aborting the remaining listeners.

use thiserror::Error;

use crate::auras::AuraId;
use crate::cards::CardId;
use crate::core::{EntityId, PlayerId};
use crate::effects::EffectId;

/// An unrecognized enumerated option in an effect definition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Required players to be 'friendly', 'enemy', or 'both', got '{0}'")]
    InvalidPlayers(String),

    #[error("Expected 'target' to be one of 'self', 'random', 'random_friendly' or 'random_enemy'. Got '{0}'")]
    InvalidBuffTarget(String),

    #[error("Unknown buff trigger '{0}'")]
    InvalidBuffWhen(String),

    #[error("Unknown card filter '{0}', expected 'card', 'minion', 'spell' or 'secret'")]
    InvalidCardFilter(String),

    #[error("Expected 'turn_ended' or 'turn_started', got '{0}'")]
    InvalidTurnEdge(String),

    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    #[error("Unknown minion type '{0}'")]
    UnknownMinionType(String),
}

/// A failure while mutating game state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Minion not found: {0}")]
    MinionNotFound(EntityId),

    #[error("Effect not found: {0}")]
    EffectNotFound(EffectId),

    #[error("Aura not found: {0}")]
    AuraNotFound(AuraId),

    #[error("Card not found: {0}")]
    CardNotFound(CardId),

    #[error("{0} is not a minion card")]
    NotAMinion(CardId),

    #[error("{player} cannot pay {cost} mana (has {available})")]
    InsufficientMana {
        player: PlayerId,
        cost: i64,
        available: i64,
    },

    #[error("{player} has no card at hand index {index}")]
    HandIndexOutOfRange { player: PlayerId, index: usize },
}

/// Engine result alias.
pub type Result<T> = std::result::Result<T, EngineError>;
