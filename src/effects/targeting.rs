//! Effect option selectors.
//!
//! Effect definitions name their triggers and targets with short option
//! strings (`"turn_ended"`, `"random_friendly"`, `"beast"`). These types are
//! the parsed forms:
//!
//! - [`TurnEdge`]: which end of a turn a timed effect fires on
//! - [`BuffWhen`]: which event a buff watches
//! - [`MinionFilter`]: which minions (or cards) satisfy a buff's trigger
//! - [`BuffTarget`]: who receives the buff
//!
//! Unknown trigger/target options are configuration errors. An unknown
//! *minion filter* is not: it parses to [`MinionFilter::Unknown`] and simply
//! never matches.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::cards::{CardDefinition, MinionType};
use crate::core::EntityId;
use crate::error::ConfigError;
use crate::events::EventKind;

/// Start or end of the casting player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnEdge {
    TurnEnded,
    TurnStarted,
}

impl TurnEdge {
    /// The event this edge corresponds to.
    #[must_use]
    pub const fn event(self) -> EventKind {
        match self {
            TurnEdge::TurnEnded => EventKind::TurnEnded,
            TurnEdge::TurnStarted => EventKind::TurnStarted,
        }
    }
}

impl FromStr for TurnEdge {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "turn_ended" => Ok(TurnEdge::TurnEnded),
            "turn_started" => Ok(TurnEdge::TurnStarted),
            other => Err(ConfigError::InvalidTurnEdge(other.to_string())),
        }
    }
}

impl std::fmt::Display for TurnEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.event().name())
    }
}

/// The event a buff watches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffWhen {
    Death,
    Damaged,
    Summoned,
    Played,
    TurnEnded,
    TurnStarted,
}

impl BuffWhen {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BuffWhen::Death => "death",
            BuffWhen::Damaged => "damaged",
            BuffWhen::Summoned => "summoned",
            BuffWhen::Played => "played",
            BuffWhen::TurnEnded => "turn_ended",
            BuffWhen::TurnStarted => "turn_started",
        }
    }

    /// The event to subscribe to. `played` listens for cards when the filter
    /// is a card filter and for minions otherwise.
    #[must_use]
    pub fn event(self, filter: &MinionFilter) -> EventKind {
        match self {
            BuffWhen::Death => EventKind::MinionDied,
            BuffWhen::Damaged => EventKind::MinionDamaged,
            BuffWhen::Summoned => EventKind::MinionSummoned,
            BuffWhen::Played if filter.is_card_filter() => EventKind::CardPlayed,
            BuffWhen::Played => EventKind::MinionPlayed,
            BuffWhen::TurnEnded => EventKind::TurnEnded,
            BuffWhen::TurnStarted => EventKind::TurnStarted,
        }
    }

    /// Turn-edge buffs fire unconditionally.
    #[must_use]
    pub const fn is_turn_edge(self) -> bool {
        matches!(self, BuffWhen::TurnEnded | BuffWhen::TurnStarted)
    }
}

impl FromStr for BuffWhen {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "death" => Ok(BuffWhen::Death),
            "damaged" => Ok(BuffWhen::Damaged),
            "summoned" => Ok(BuffWhen::Summoned),
            "played" => Ok(BuffWhen::Played),
            "turn_ended" => Ok(BuffWhen::TurnEnded),
            "turn_started" => Ok(BuffWhen::TurnStarted),
            other => Err(ConfigError::InvalidBuffWhen(other.to_string())),
        }
    }
}

/// Which minion (or card) satisfies a buff's trigger.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinionFilter {
    /// Only the buff's own minion.
    SelfOnly,
    /// Any minion.
    Minion,
    /// Minions that currently have a deathrattle.
    Deathrattle,
    /// Any spell card (secrets included).
    Spell,
    /// Secret cards.
    Secret,
    /// Any card.
    Card,
    /// Minions of a tribe.
    Type(MinionType),
    /// A tribe name that does not exist. Never matches.
    Unknown(String),
}

impl MinionFilter {
    /// Parse a filter option. Never fails.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "self" => MinionFilter::SelfOnly,
            "minion" => MinionFilter::Minion,
            "deathrattle" => MinionFilter::Deathrattle,
            "spell" => MinionFilter::Spell,
            "secret" => MinionFilter::Secret,
            "card" => MinionFilter::Card,
            other => match other.parse::<MinionType>() {
                Ok(t) => MinionFilter::Type(t),
                Err(_) => MinionFilter::Unknown(other.to_string()),
            },
        }
    }

    /// Filters that look at played cards rather than minions.
    #[must_use]
    pub fn is_card_filter(&self) -> bool {
        matches!(self, MinionFilter::Spell | MinionFilter::Secret | MinionFilter::Card)
    }

    /// Match a minion, given the buff's own minion as `source`.
    #[must_use]
    pub fn matches_minion(
        &self,
        minion: EntityId,
        minion_type: MinionType,
        has_deathrattle: bool,
        source: EntityId,
    ) -> bool {
        match self {
            MinionFilter::SelfOnly => minion == source,
            MinionFilter::Minion => true,
            MinionFilter::Deathrattle => has_deathrattle,
            MinionFilter::Type(t) => *t == minion_type,
            MinionFilter::Spell
            | MinionFilter::Secret
            | MinionFilter::Card
            | MinionFilter::Unknown(_) => false,
        }
    }

    /// Match a played card.
    #[must_use]
    pub fn matches_card(&self, card: &CardDefinition) -> bool {
        match self {
            MinionFilter::Spell => card.is_spell(),
            MinionFilter::Secret => card.is_secret(),
            MinionFilter::Card => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for MinionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MinionFilter::SelfOnly => f.write_str("self"),
            MinionFilter::Minion => f.write_str("minion"),
            MinionFilter::Deathrattle => f.write_str("deathrattle"),
            MinionFilter::Spell => f.write_str("spell"),
            MinionFilter::Secret => f.write_str("secret"),
            MinionFilter::Card => f.write_str("card"),
            MinionFilter::Type(t) => f.write_str(&t.as_str().to_ascii_lowercase()),
            MinionFilter::Unknown(s) => f.write_str(s),
        }
    }
}

/// Who receives a buff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuffTarget {
    /// The buff's own minion.
    SelfOnly,
    /// A random minion on either side, other than the buff's own.
    Random,
    /// A random friendly minion other than the buff's own.
    RandomFriendly,
    /// A random enemy minion.
    RandomEnemy,
}

impl BuffTarget {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BuffTarget::SelfOnly => "self",
            BuffTarget::Random => "random",
            BuffTarget::RandomFriendly => "random_friendly",
            BuffTarget::RandomEnemy => "random_enemy",
        }
    }
}

impl FromStr for BuffTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "self" => Ok(BuffTarget::SelfOnly),
            "random" => Ok(BuffTarget::Random),
            "random_friendly" => Ok(BuffTarget::RandomFriendly),
            "random_enemy" => Ok(BuffTarget::RandomEnemy),
            other => Err(ConfigError::InvalidBuffTarget(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    #[test]
    fn test_turn_edge() {
        assert_eq!("turn_started".parse::<TurnEdge>().unwrap().event(), EventKind::TurnStarted);
        assert!("midnight".parse::<TurnEdge>().is_err());
        assert_eq!(TurnEdge::TurnEnded.to_string(), "turn_ended");
    }

    #[test]
    fn test_buff_when_event_selection() {
        let spell = MinionFilter::parse("spell");
        let beast = MinionFilter::parse("beast");

        assert_eq!(BuffWhen::Played.event(&spell), EventKind::CardPlayed);
        assert_eq!(BuffWhen::Played.event(&beast), EventKind::MinionPlayed);
        assert_eq!(BuffWhen::Death.event(&beast), EventKind::MinionDied);
        assert!(BuffWhen::TurnStarted.is_turn_edge());
    }

    #[test]
    fn test_unknown_tribe_never_matches() {
        let filter = MinionFilter::parse("elemental");
        assert_eq!(filter, MinionFilter::Unknown("elemental".to_string()));
        assert!(!filter.matches_minion(EntityId(1), MinionType::None, true, EntityId(1)));
        assert_eq!(filter.to_string(), "elemental");
    }

    #[test]
    fn test_minion_filters() {
        let me = EntityId(1);
        let other = EntityId(2);

        assert!(MinionFilter::SelfOnly.matches_minion(me, MinionType::None, false, me));
        assert!(!MinionFilter::SelfOnly.matches_minion(other, MinionType::None, false, me));
        assert!(MinionFilter::Deathrattle.matches_minion(other, MinionType::None, true, me));
        assert!(!MinionFilter::Deathrattle.matches_minion(other, MinionType::None, false, me));
        assert!(MinionFilter::parse("murloc").matches_minion(other, MinionType::Murloc, false, me));
        assert!(!MinionFilter::Spell.matches_minion(other, MinionType::None, false, me));
    }

    #[test]
    fn test_card_filters() {
        let secret = CardDefinition::secret(CardId::new(1), "Snipe", 2);
        let minion = CardDefinition::minion(CardId::new(2), "Wisp", 0, 1, 1);

        assert!(MinionFilter::Spell.matches_card(&secret));
        assert!(MinionFilter::Secret.matches_card(&secret));
        assert!(!MinionFilter::Secret.matches_card(&minion));
        assert!(MinionFilter::Card.matches_card(&minion));
    }

    #[test]
    fn test_buff_target_parse() {
        assert_eq!("random_enemy".parse::<BuffTarget>(), Ok(BuffTarget::RandomEnemy));
        assert_eq!(
            "everyone".parse::<BuffTarget>(),
            Err(ConfigError::InvalidBuffTarget("everyone".to_string()))
        );
    }
}
