//! # ccg-effects
//!
//! The reactive core of a turn-based collectible card game: an event bus,
//! persistent effects with symmetric apply/unapply, count-gated player-wide
//! effects, stat and charge auras, mana cost filters and chainable
//! deathrattles.
//!
//! ## Design Principles
//!
//! 1. **Handlers Are Values**: Listeners are plain `Handler` values stored on
//!    per-entity buses, so `unbind` works by equality and the game clones.
//!
//! 2. **Symmetric Lifecycle**: `unapply` removes exactly what `apply`
//!    installed, with two deliberate exceptions (`SummonOnDeath`,
//!    `StatsAura`).
//!
//! 3. **Fold At Read Time**: Aura bonuses and mana filters are never written
//!    into minions or cards; getters fold them on demand.
//!
//! ## Architecture
//!
//! - **Arena**: `Game` owns players, minions, effects and auras; everything
//!   else refers to them by id.
//!
//! - **Snapshot Dispatch**: A publish iterates a copy of the listener list,
//!   so handlers can bind, unbind and publish re-entrantly.
//!
//! ## Modules
//!
//! - `core`: Entity and player ids, configuration, RNG
//! - `cards`: Card definitions and the card registry
//! - `events`: Event vocabulary, buses and the dispatch contract
//! - `effects`: Effect kinds, instances, the count registry, deathrattles
//! - `auras`: Stat auras and charge aura membership
//! - `mana`: Mana filter chains
//! - `game`: The game arena and its board actions
//! - `error`: Error types

pub mod core;
pub mod cards;
pub mod events;
pub mod effects;
pub mod auras;
pub mod mana;
pub mod game;
pub mod error;

// Re-export commonly used types
pub use crate::core::{EntityId, GameConfig, GameRng, PlayerId, PlayerMap, PlayerScope};

pub use crate::cards::{CardDefinition, CardId, CardKind, CardRegistry, MinionType, TypeFilter};

pub use crate::events::{Character, EventBus, EventHost, EventKind, GameEvent};

pub use crate::effects::{
    Deathrattle, EffectId, EffectInstance, EffectKind, EffectRegistry, EffectTag,
};

pub use crate::auras::{Aura, AuraEngine, AuraId, AuraPredicate, ChargeTracker};

pub use crate::mana::{CardFilter, ManaFilterChain, ManaFilterEntry};

pub use crate::game::{EventSource, Game, Handler, Minion, Player};

pub use crate::error::{ConfigError, EngineError, Result};
