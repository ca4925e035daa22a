//! Listener values stored on the game's buses.

use serde::{Deserialize, Serialize};

use crate::auras::AuraId;
use crate::core::{EntityId, PlayerId};
use crate::effects::{EffectAction, EffectId};

/// Names a bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventSource {
    Game,
    Player(PlayerId),
    Minion(EntityId),
}

/// What runs when a listener fires.
///
/// Handlers are compared by value, so an effect can `unbind` exactly the
/// listener it bound by rebuilding the same `Handler`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handler {
    /// A listener owned by an effect instance.
    Effect { effect: EffectId, action: EffectAction },
    /// Re-run the dead minion's deathrattle. Shared by every instance of the
    /// count-gated effect, so it is not keyed by instance.
    DoubleDeathrattle,
    /// Add a newly placed minion to an aura.
    AuraJoin(AuraId),
    /// Remove a dead minion from an aura.
    AuraLeave(AuraId),
}

impl Handler {
    #[must_use]
    pub const fn effect(effect: EffectId, action: EffectAction) -> Self {
        Handler::Effect { effect, action }
    }

    /// The effect's plain listener.
    #[must_use]
    pub const fn fire(effect: EffectId) -> Self {
        Handler::Effect {
            effect,
            action: EffectAction::Fire,
        }
    }
}
