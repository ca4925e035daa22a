//! Minions in play.

use serde::{Deserialize, Serialize};

use crate::auras::AuraId;
use crate::cards::{CardDefinition, CardId, MinionType};
use crate::core::{EntityId, PlayerId};
use crate::effects::{Deathrattle, EffectId};
use crate::error::{EngineError, Result};
use crate::events::EventBus;

use super::handler::Handler;

/// A minion on (or formerly on) the board.
///
/// Stats are stored unfolded: `base + bonus`. Aura bonuses are added by the
/// game's stat getters at read time, never written here. Dead minions keep
/// their record so late listeners can still look them up.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Minion {
    pub id: EntityId,
    /// The card the minion was created from.
    pub card: CardId,
    pub owner: PlayerId,
    pub minion_type: MinionType,

    // === Stats ===
    pub base_attack: i64,
    pub base_health: i64,
    /// Permanent attack changes.
    pub attack_bonus: i64,
    /// Permanent max-health changes.
    pub health_bonus: i64,
    pub damage: i64,

    // === Keywords ===
    pub battlecry: bool,
    pub charge: bool,
    pub immune: bool,
    pub frozen: bool,
    pub silenced: bool,
    pub dead: bool,

    /// The deathrattle slot; granted deathrattles chain onto it.
    pub deathrattle: Option<Deathrattle>,

    /// Effects attached to this minion, in attach order.
    pub effects: Vec<EffectId>,

    /// Auras this minion projects.
    pub auras: Vec<AuraId>,

    pub bus: EventBus<Handler>,
}

impl Minion {
    /// Build a fresh minion from its card. Card effects are not attached.
    pub fn from_card(id: EntityId, card: &CardDefinition, owner: PlayerId) -> Result<Self> {
        let stats = card.minion_stats().ok_or(EngineError::NotAMinion(card.id))?;
        Ok(Self {
            id,
            card: card.id,
            owner,
            minion_type: stats.minion_type,
            base_attack: stats.attack,
            base_health: stats.health,
            attack_bonus: 0,
            health_bonus: 0,
            damage: 0,
            battlecry: stats.battlecry,
            charge: stats.charge,
            immune: false,
            frozen: false,
            silenced: false,
            dead: false,
            deathrattle: stats.deathrattle.clone(),
            effects: Vec::new(),
            auras: Vec::new(),
            bus: EventBus::new(),
        })
    }

    /// Attack without aura bonuses.
    #[must_use]
    pub fn own_attack(&self) -> i64 {
        self.base_attack + self.attack_bonus
    }

    /// Max health without aura bonuses.
    #[must_use]
    pub fn own_max_health(&self) -> i64 {
        self.base_health + self.health_bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_card() {
        let card = CardDefinition::minion(CardId::new(3), "Raptor", 2, 3, 2)
            .with_minion_type(MinionType::Beast)
            .with_charge()
            .with_deathrattle(Deathrattle::draw(1));

        let minion = Minion::from_card(EntityId(7), &card, PlayerId::new(1)).unwrap();
        assert_eq!(minion.card, CardId::new(3));
        assert_eq!(minion.owner, PlayerId::new(1));
        assert_eq!(minion.own_attack(), 3);
        assert_eq!(minion.own_max_health(), 2);
        assert!(minion.charge);
        assert!(minion.deathrattle.is_some());
        assert!(minion.bus.is_empty());
    }

    #[test]
    fn test_from_spell_card_fails() {
        let card = CardDefinition::spell(CardId::new(4), "Fireball", 4);
        assert_eq!(
            Minion::from_card(EntityId(1), &card, PlayerId::new(0)).unwrap_err(),
            EngineError::NotAMinion(CardId::new(4))
        );
    }
}
