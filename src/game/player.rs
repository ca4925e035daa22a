//! Per-player state.
//!
//! Card collections use `im::Vector` so the whole game stays cheap to clone.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardId};
use crate::core::{EntityId, GameConfig, PlayerId};
use crate::effects::EffectRegistry;
use crate::events::EventBus;
use crate::mana::ManaFilterChain;

use super::handler::Handler;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub hero_health: i64,
    pub hero_frozen: bool,
    pub mana: i64,

    /// Board, left to right.
    pub minions: Vector<EntityId>,
    pub hand: Vector<CardId>,
    /// Top of the deck is the front.
    pub deck: Vector<CardId>,
    pub secrets: Vector<CardId>,

    pub mana_filters: ManaFilterChain,
    /// Applied effects on this player's minions, by type.
    pub effect_count: EffectRegistry,
    /// Healing by this player deals damage instead.
    pub heal_does_damage: bool,

    pub bus: EventBus<Handler>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, config: &GameConfig) -> Self {
        Self {
            id,
            hero_health: config.hero_health,
            hero_frozen: false,
            mana: config.starting_mana,
            minions: Vector::new(),
            hand: Vector::new(),
            deck: Vector::new(),
            secrets: Vector::new(),
            mana_filters: ManaFilterChain::new(),
            effect_count: EffectRegistry::new(),
            heal_does_damage: false,
            bus: EventBus::new(),
        }
    }

    /// Board index of `minion`.
    #[must_use]
    pub fn board_position(&self, minion: EntityId) -> Option<usize> {
        self.minions.iter().position(|&m| m == minion)
    }

    /// The card's cost after this player's mana filters.
    #[must_use]
    pub fn effective_cost(&self, card: &CardDefinition) -> i64 {
        self.mana_filters.effective_cost(card)
    }
}
