//! Effect instances - runtime state of an attached effect.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::auras::ChargeTracker;
use crate::cards::CardId;
use crate::core::{EntityId, PlayerId};
use crate::mana::FilterId;

use super::effect::EffectKind;

/// Unique identifier for an effect instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectId(pub u32);

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({})", self.0)
    }
}

/// What a listener owned by an effect should do when it fires.
///
/// Most effects only ever `Fire`. The charge aura tracks individual minions
/// and keys its per-minion listeners by the minion they watch, so `unbind`
/// can find each one by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectAction {
    Fire,
    /// A minion was played on a watched side.
    ChargeJoined,
    /// A natively charged minion was silenced.
    ChargeAdopt(EntityId),
    /// A temporarily granted minion was silenced.
    ChargeMigrate(EntityId),
    /// A permanently granted minion was silenced.
    ChargeRevoke(EntityId),
    /// A permanently granted minion was copied.
    ChargeCopied(EntityId),
}

/// Bookkeeping an applied effect needs to undo itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectState {
    /// Player buses the effect bound listeners on, captured at apply time.
    pub bound_players: SmallVec<[PlayerId; 2]>,
    /// Mana filter pushed by the effect.
    pub filter: Option<FilterId>,
    /// Charge aura membership.
    pub charge: ChargeTracker,
    /// Friendly minions that died since the last turn end.
    pub pending_resurrection: Vec<CardId>,
}

/// An effect attached to a minion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectInstance {
    pub id: EffectId,
    pub kind: EffectKind,
    /// The minion the effect is attached to.
    pub target: EntityId,
    /// Between `apply` and `unapply`.
    pub applied: bool,
    pub state: EffectState,
}

impl EffectInstance {
    #[must_use]
    pub fn new(id: EffectId, kind: EffectKind, target: EntityId) -> Self {
        Self {
            id,
            kind,
            target,
            applied: false,
            state: EffectState::default(),
        }
    }
}

impl std::fmt::Display for EffectInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            EffectKind::ResurrectFriendlyMinionsAtEndOfTurn => {
                let pending: Vec<String> = self
                    .state
                    .pending_resurrection
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                write!(f, "{}([{}])", self.kind, pending.join(", "))
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_instance_is_unapplied() {
        let effect = EffectInstance::new(EffectId(1), EffectKind::Immune, EntityId(4));
        assert!(!effect.applied);
        assert!(effect.state.bound_players.is_empty());
        assert_eq!(effect.to_string(), "Immune");
    }

    #[test]
    fn test_resurrect_lists_pending_cards() {
        let mut effect = EffectInstance::new(
            EffectId(2),
            EffectKind::ResurrectFriendlyMinionsAtEndOfTurn,
            EntityId(4),
        );
        effect.state.pending_resurrection = vec![CardId::new(3), CardId::new(5)];
        assert_eq!(
            effect.to_string(),
            "ResurrectFriendlyMinionsAtEndOfTurn([Card(3), Card(5)])"
        );
    }

    #[test]
    fn test_effect_id_display() {
        assert_eq!(EffectId(9).to_string(), "Effect(9)");
    }
}
