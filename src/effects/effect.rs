//! Effect definitions.
//!
//! An `EffectKind` is the static description of a persistent effect: what it
//! listens to, what it changes and how it is undone. Runtime bookkeeping
//! (which buses it bound to, which filters it pushed) lives on
//! [`EffectInstance`](super::EffectInstance).

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, TypeFilter};
use crate::core::PlayerScope;
use crate::error::ConfigError;
use crate::mana::CardFilter;

use super::targeting::{BuffTarget, BuffWhen, MinionFilter, TurnEdge};

/// A persistent effect attached to a minion.
///
/// ## Timed Effects
///
/// - `KillMinion`: the minion dies at a turn edge of the casting player
/// - `Immune`: no damage until the casting player's turn ends
///
/// ## Reactive Effects
///
/// - `DrawOnMinion`, `GrowIfSecret`, `AddCardOnSpell`, `FreezeOnDamage`,
///   `KillOnDamage`, `DrawOnAttack`, `Buff`, `ResurrectFriendlyMinionsAtEndOfTurn`
///
/// ## Auras and Filters
///
/// - `ChargeAura`, `StatsAura`: continuous effects on other minions
/// - `ManaFilter`, `IncreaseBattlecryMinionCost`: card cost adjustments
///
/// ## Count-Gated Flags
///
/// - `DoubleDeathrattle`, `HealAsDamage`: player-wide behavior that stays on
///   while at least one instance is applied
///
/// ## Deathrattle Grants
///
/// - `SummonOnDeath`: chains onto the minion's deathrattle slot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    // === Timed ===

    /// The minion dies at the chosen edge of the casting player's turn.
    KillMinion { when: TurnEdge },

    /// The minion takes no damage until the casting player's turn ends.
    Immune,

    // === Deathrattle grants ===

    /// Summon `count` copies of `card` after any existing deathrattle.
    SummonOnDeath { card: CardId, count: u32 },

    // === Reactive ===

    /// The owner draws when another minion of the given tribe is placed.
    DrawOnMinion { minion_type: TypeFilter },

    /// At the end of the owner's turn, grow if the owner has a secret.
    GrowIfSecret { attack: i64, health: i64 },

    /// Whenever the owner casts a spell, add `card` to their hand.
    AddCardOnSpell { card: CardId },

    /// Freeze any character this minion damages.
    FreezeOnDamage,

    /// Destroy any minion this minion damages.
    KillOnDamage,

    /// When this minion attacks, the first (or second) player draws.
    DrawOnAttack { amount: u32, first_player: bool },

    /// Generic triggered stat change.
    Buff(BuffSpec),

    /// Remember friendly minions that die and summon them again at the end
    /// of the turn.
    ResurrectFriendlyMinionsAtEndOfTurn,

    // === Auras ===

    /// Other matching minions have charge while this minion lives.
    ChargeAura {
        players: PlayerScope,
        minion_type: TypeFilter,
    },

    /// Other matching minions get `+attack/+health` while this minion lives.
    StatsAura {
        attack: i64,
        health: i64,
        players: PlayerScope,
        minion_type: TypeFilter,
    },

    // === Mana ===

    /// Battlecry minions cost `amount` more for both players.
    IncreaseBattlecryMinionCost { amount: i64 },

    /// Matching cards cost `amount` less, never below `minimum`.
    ManaFilter {
        amount: i64,
        filter: CardFilter,
        minimum: i64,
        players: PlayerScope,
    },

    // === Count-gated ===

    /// Friendly deathrattles trigger twice.
    DoubleDeathrattle,

    /// The owner's healing deals damage instead.
    HealAsDamage,
}

/// Parameters of [`EffectKind::Buff`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffSpec {
    pub when: BuffWhen,
    pub filter: MinionFilter,
    pub target: BuffTarget,
    pub attack: i64,
    pub health: i64,
    pub players: PlayerScope,
}

impl BuffSpec {
    /// JSON description with the option strings the buff was built from.
    #[must_use]
    pub fn describe(&self) -> serde_json::Value {
        serde_json::json!({
            "action": "buff",
            "when": self.when.as_str(),
            "filter": self.filter.to_string(),
            "target": self.target.as_str(),
            "attack": self.attack,
            "health": self.health,
            "players": self.players.as_str(),
        })
    }
}

/// Count-registry key: one per effect type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectTag {
    KillMinion,
    Immune,
    SummonOnDeath,
    DrawOnMinion,
    GrowIfSecret,
    AddCardOnSpell,
    FreezeOnDamage,
    KillOnDamage,
    DrawOnAttack,
    Buff,
    ResurrectFriendlyMinionsAtEndOfTurn,
    ChargeAura,
    StatsAura,
    IncreaseBattlecryMinionCost,
    ManaFilter,
    DoubleDeathrattle,
    HealAsDamage,
}

impl EffectKind {
    /// Kill the minion at a turn edge, e.g. `"turn_ended"`.
    pub fn kill_minion(when: &str) -> Result<Self, ConfigError> {
        Ok(EffectKind::KillMinion { when: when.parse()? })
    }

    /// Charge aura over `"friendly"`, `"enemy"` or `"both"` players.
    pub fn charge_aura(players: &str, minion_type: TypeFilter) -> Result<Self, ConfigError> {
        Ok(EffectKind::ChargeAura {
            players: players.parse()?,
            minion_type,
        })
    }

    /// Stats aura over `"friendly"`, `"enemy"` or `"both"` players.
    pub fn stats_aura(
        attack: i64,
        health: i64,
        players: &str,
        minion_type: TypeFilter,
    ) -> Result<Self, ConfigError> {
        Ok(EffectKind::StatsAura {
            attack,
            health,
            players: players.parse()?,
            minion_type,
        })
    }

    /// Cost reduction of `amount` on cards matching `filter_type`.
    pub fn mana_filter(
        amount: i64,
        filter_type: &str,
        minimum: i64,
        players: &str,
    ) -> Result<Self, ConfigError> {
        Ok(EffectKind::ManaFilter {
            amount,
            filter: filter_type.parse()?,
            minimum,
            players: players.parse()?,
        })
    }

    /// Triggered buff from option strings.
    ///
    /// `when`, `target` and `players` must be known options. `filter` may
    /// name a tribe that does not exist; such a buff never fires.
    ///
    /// ```
    /// use ccg_effects::effects::EffectKind;
    ///
    /// let buff = EffectKind::buff("death", "murloc", "self", 1, 0, "both").unwrap();
    /// assert_eq!(buff.tag(), ccg_effects::effects::EffectTag::Buff);
    /// assert!(EffectKind::buff("dawn", "murloc", "self", 1, 0, "both").is_err());
    /// ```
    pub fn buff(
        when: &str,
        filter: &str,
        target: &str,
        attack: i64,
        health: i64,
        players: &str,
    ) -> Result<Self, ConfigError> {
        Ok(EffectKind::Buff(BuffSpec {
            when: when.parse()?,
            filter: MinionFilter::parse(filter),
            target: target.parse()?,
            attack,
            health,
            players: players.parse()?,
        }))
    }

    /// The registry key for this effect's type.
    #[must_use]
    pub fn tag(&self) -> EffectTag {
        match self {
            EffectKind::KillMinion { .. } => EffectTag::KillMinion,
            EffectKind::Immune => EffectTag::Immune,
            EffectKind::SummonOnDeath { .. } => EffectTag::SummonOnDeath,
            EffectKind::DrawOnMinion { .. } => EffectTag::DrawOnMinion,
            EffectKind::GrowIfSecret { .. } => EffectTag::GrowIfSecret,
            EffectKind::AddCardOnSpell { .. } => EffectTag::AddCardOnSpell,
            EffectKind::FreezeOnDamage => EffectTag::FreezeOnDamage,
            EffectKind::KillOnDamage => EffectTag::KillOnDamage,
            EffectKind::DrawOnAttack { .. } => EffectTag::DrawOnAttack,
            EffectKind::Buff(_) => EffectTag::Buff,
            EffectKind::ResurrectFriendlyMinionsAtEndOfTurn => {
                EffectTag::ResurrectFriendlyMinionsAtEndOfTurn
            }
            EffectKind::ChargeAura { .. } => EffectTag::ChargeAura,
            EffectKind::StatsAura { .. } => EffectTag::StatsAura,
            EffectKind::IncreaseBattlecryMinionCost { .. } => EffectTag::IncreaseBattlecryMinionCost,
            EffectKind::ManaFilter { .. } => EffectTag::ManaFilter,
            EffectKind::DoubleDeathrattle => EffectTag::DoubleDeathrattle,
            EffectKind::HealAsDamage => EffectTag::HealAsDamage,
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectKind::KillMinion { when } => write!(f, "KillMinion({})", when),
            EffectKind::Immune => f.write_str("Immune"),
            EffectKind::SummonOnDeath { card, .. } => write!(f, "SummonOnDeath({})", card),
            EffectKind::DrawOnMinion { minion_type } => match minion_type {
                TypeFilter::All => f.write_str("DrawOnMinion(All)"),
                TypeFilter::Only(t) => write!(f, "DrawOnMinion({})", t),
            },
            EffectKind::GrowIfSecret { attack, health } => {
                write!(f, "GrowIf(Secret, {}, {})", attack, health)
            }
            EffectKind::AddCardOnSpell { card } => write!(f, "AddOnSpell({})", card),
            EffectKind::FreezeOnDamage => f.write_str("OnDamage(freeze)"),
            EffectKind::KillOnDamage => f.write_str("OnDamage(kill)"),
            EffectKind::DrawOnAttack { amount, .. } => write!(f, "DrawOn(attack, {})", amount),
            EffectKind::Buff(spec) => write!(f, "{}", spec.describe()),
            EffectKind::ResurrectFriendlyMinionsAtEndOfTurn => {
                f.write_str("ResurrectFriendlyMinionsAtEndOfTurn")
            }
            EffectKind::ChargeAura { players, minion_type } => {
                write!(f, "ChargeAura({}, {})", players, minion_type)
            }
            EffectKind::StatsAura {
                attack,
                health,
                players,
                minion_type,
            } => write!(f, "StatsAura({}, {}, {}, {})", attack, health, players, minion_type),
            EffectKind::IncreaseBattlecryMinionCost { amount } => {
                write!(f, "IncreaseMinionCost(battlecry, {})", amount)
            }
            EffectKind::ManaFilter {
                amount,
                filter,
                minimum,
                players,
            } => write!(f, "ManaFilter({}, {}, {}, {})", amount, minimum, filter, players),
            EffectKind::DoubleDeathrattle => f.write_str("DoubleDeathrattle()"),
            EffectKind::HealAsDamage => f.write_str("HealAsDamage()"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::MinionType;

    #[test]
    fn test_display_strings() {
        assert_eq!(
            EffectKind::kill_minion("turn_ended").unwrap().to_string(),
            "KillMinion(turn_ended)"
        );
        assert_eq!(
            EffectKind::SummonOnDeath { card: CardId::new(7), count: 2 }.to_string(),
            "SummonOnDeath(Card(7))"
        );
        assert_eq!(
            EffectKind::DrawOnMinion { minion_type: TypeFilter::All }.to_string(),
            "DrawOnMinion(All)"
        );
        assert_eq!(
            EffectKind::DrawOnMinion { minion_type: TypeFilter::Only(MinionType::Beast) }.to_string(),
            "DrawOnMinion(BEAST)"
        );
        assert_eq!(
            EffectKind::charge_aura("friendly", TypeFilter::All).unwrap().to_string(),
            "ChargeAura(friendly, ALL)"
        );
        assert_eq!(
            EffectKind::stats_aura(1, 1, "both", TypeFilter::Only(MinionType::Murloc))
                .unwrap()
                .to_string(),
            "StatsAura(1, 1, both, MURLOC)"
        );
        assert_eq!(
            EffectKind::mana_filter(2, "spell", 0, "friendly").unwrap().to_string(),
            "ManaFilter(2, 0, spell, friendly)"
        );
        assert_eq!(
            EffectKind::IncreaseBattlecryMinionCost { amount: 3 }.to_string(),
            "IncreaseMinionCost(battlecry, 3)"
        );
        assert_eq!(EffectKind::DoubleDeathrattle.to_string(), "DoubleDeathrattle()");
        assert_eq!(EffectKind::HealAsDamage.to_string(), "HealAsDamage()");
        assert_eq!(EffectKind::KillOnDamage.to_string(), "OnDamage(kill)");
        assert_eq!(
            EffectKind::DrawOnAttack { amount: 1, first_player: true }.to_string(),
            "DrawOn(attack, 1)"
        );
    }

    #[test]
    fn test_buff_description_is_json() {
        let buff = EffectKind::buff("played", "spell", "self", 1, 1, "friendly").unwrap();
        let value: serde_json::Value = serde_json::from_str(&buff.to_string()).unwrap();

        assert_eq!(value["action"], "buff");
        assert_eq!(value["when"], "played");
        assert_eq!(value["filter"], "spell");
        assert_eq!(value["target"], "self");
        assert_eq!(value["attack"], 1);
        assert_eq!(value["players"], "friendly");
    }

    #[test]
    fn test_invalid_options_fail_at_construction() {
        assert!(matches!(
            EffectKind::charge_aura("neutral", TypeFilter::All),
            Err(ConfigError::InvalidPlayers(_))
        ));
        assert!(matches!(
            EffectKind::mana_filter(1, "weapon", 0, "friendly"),
            Err(ConfigError::InvalidCardFilter(_))
        ));
        assert!(matches!(
            EffectKind::buff("death", "minion", "anyone", 1, 1, "friendly"),
            Err(ConfigError::InvalidBuffTarget(_))
        ));
        assert!(matches!(
            EffectKind::kill_minion("noon"),
            Err(ConfigError::InvalidTurnEdge(_))
        ));
    }

    #[test]
    fn test_unknown_buff_tribe_is_accepted() {
        let buff = EffectKind::buff("death", "elemental", "self", 1, 1, "friendly").unwrap();
        match buff {
            EffectKind::Buff(spec) => {
                assert_eq!(spec.filter, MinionFilter::Unknown("elemental".to_string()))
            }
            other => panic!("expected buff, got {other:?}"),
        }
    }

    #[test]
    fn test_tags_distinguish_types() {
        assert_eq!(EffectKind::HealAsDamage.tag(), EffectTag::HealAsDamage);
        assert_ne!(EffectKind::KillOnDamage.tag(), EffectKind::FreezeOnDamage.tag());
    }
}
