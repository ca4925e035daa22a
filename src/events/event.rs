//! Event vocabulary and payloads.
//!
//! ## EventKind
//!
//! The fixed set of events the effect core listens to or publishes. Each has a
//! snake_case name (`"minion_died"`) used in effect definitions and logs.
//!
//! ## GameEvent
//!
//! A published event with its payload. Which fields are set depends on the
//! kind:
//!
//! | kind | payload |
//! |------|---------|
//! | `turn_started`, `turn_ended`, `silenced` | none |
//! | `minion_played`, `minion_placed`, `minion_summoned` | `minion` |
//! | `minion_died` | `minion`, `character` (killer, if any) |
//! | `minion_damaged` | `minion`, `amount` |
//! | `card_played`, `spell_cast` | `card` |
//! | `attack` | `character` (attack target) |
//! | `did_damage` | `amount`, `character` (damaged) |
//! | `copied` | `minion` (the new copy), `player` (its owner) |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::cards::CardId;
use crate::core::{EntityId, PlayerId};
use crate::error::ConfigError;

/// Event kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    TurnStarted,
    TurnEnded,
    MinionPlayed,
    MinionPlaced,
    MinionSummoned,
    MinionDied,
    MinionDamaged,
    CardPlayed,
    SpellCast,
    Attack,
    DidDamage,
    Silenced,
    Copied,
}

impl EventKind {
    /// Every event kind.
    pub const ALL: [EventKind; 13] = [
        EventKind::TurnStarted,
        EventKind::TurnEnded,
        EventKind::MinionPlayed,
        EventKind::MinionPlaced,
        EventKind::MinionSummoned,
        EventKind::MinionDied,
        EventKind::MinionDamaged,
        EventKind::CardPlayed,
        EventKind::SpellCast,
        EventKind::Attack,
        EventKind::DidDamage,
        EventKind::Silenced,
        EventKind::Copied,
    ];

    /// The event's name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EventKind::TurnStarted => "turn_started",
            EventKind::TurnEnded => "turn_ended",
            EventKind::MinionPlayed => "minion_played",
            EventKind::MinionPlaced => "minion_placed",
            EventKind::MinionSummoned => "minion_summoned",
            EventKind::MinionDied => "minion_died",
            EventKind::MinionDamaged => "minion_damaged",
            EventKind::CardPlayed => "card_played",
            EventKind::SpellCast => "spell_cast",
            EventKind::Attack => "attack",
            EventKind::DidDamage => "did_damage",
            EventKind::Silenced => "silenced",
            EventKind::Copied => "copied",
        }
    }
}

impl FromStr for EventKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownEvent(s.to_string()))
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything that can attack, be attacked or take damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Character {
    Hero(PlayerId),
    Minion(EntityId),
}

impl Character {
    /// The minion, if this character is one.
    #[must_use]
    pub fn minion(self) -> Option<EntityId> {
        match self {
            Character::Minion(id) => Some(id),
            Character::Hero(_) => None,
        }
    }
}

impl std::fmt::Display for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Character::Hero(player) => write!(f, "Hero({})", player.0),
            Character::Minion(id) => write!(f, "{}", id),
        }
    }
}

/// A published event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// The kind of event.
    pub kind: EventKind,

    /// The minion the event is about.
    pub minion: Option<EntityId>,

    /// The other character involved (killer, attack target, damaged).
    pub character: Option<Character>,

    /// The player involved (new owner of a copy).
    pub player: Option<PlayerId>,

    /// The card involved.
    pub card: Option<CardId>,

    /// Damage dealt or taken.
    pub amount: i64,
}

impl GameEvent {
    /// Create an event with no payload.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            minion: None,
            character: None,
            player: None,
            card: None,
            amount: 0,
        }
    }

    /// Set the minion (builder pattern).
    #[must_use]
    pub fn with_minion(mut self, minion: EntityId) -> Self {
        self.minion = Some(minion);
        self
    }

    /// Set the other character (builder pattern).
    #[must_use]
    pub fn with_character(mut self, character: Character) -> Self {
        self.character = Some(character);
        self
    }

    /// Set the player (builder pattern).
    #[must_use]
    pub fn with_player(mut self, player: PlayerId) -> Self {
        self.player = Some(player);
        self
    }

    /// Set the card (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: CardId) -> Self {
        self.card = Some(card);
        self
    }

    /// Set the amount (builder pattern).
    #[must_use]
    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }
}

/// Constructors for each event kind.
impl GameEvent {
    pub fn turn_started() -> Self {
        Self::new(EventKind::TurnStarted)
    }

    pub fn turn_ended() -> Self {
        Self::new(EventKind::TurnEnded)
    }

    pub fn minion_played(minion: EntityId) -> Self {
        Self::new(EventKind::MinionPlayed).with_minion(minion)
    }

    pub fn minion_placed(minion: EntityId) -> Self {
        Self::new(EventKind::MinionPlaced).with_minion(minion)
    }

    pub fn minion_summoned(minion: EntityId) -> Self {
        Self::new(EventKind::MinionSummoned).with_minion(minion)
    }

    pub fn minion_died(minion: EntityId, killer: Option<Character>) -> Self {
        let event = Self::new(EventKind::MinionDied).with_minion(minion);
        match killer {
            Some(killer) => event.with_character(killer),
            None => event,
        }
    }

    pub fn minion_damaged(minion: EntityId, amount: i64) -> Self {
        Self::new(EventKind::MinionDamaged)
            .with_minion(minion)
            .with_amount(amount)
    }

    pub fn card_played(card: CardId) -> Self {
        Self::new(EventKind::CardPlayed).with_card(card)
    }

    pub fn spell_cast(card: CardId) -> Self {
        Self::new(EventKind::SpellCast).with_card(card)
    }

    pub fn attack(target: Character) -> Self {
        Self::new(EventKind::Attack).with_character(target)
    }

    pub fn did_damage(amount: i64, damaged: Character) -> Self {
        Self::new(EventKind::DidDamage)
            .with_amount(amount)
            .with_character(damaged)
    }

    pub fn silenced() -> Self {
        Self::new(EventKind::Silenced)
    }

    pub fn copied(new_minion: EntityId, new_owner: PlayerId) -> Self {
        Self::new(EventKind::Copied)
            .with_minion(new_minion)
            .with_player(new_owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(kind.name().parse::<EventKind>(), Ok(kind));
        }
        assert_eq!(EventKind::MinionDied.to_string(), "minion_died");
    }

    #[test]
    fn test_unknown_event_name() {
        assert_eq!(
            "minion_exploded".parse::<EventKind>(),
            Err(ConfigError::UnknownEvent("minion_exploded".to_string()))
        );
    }

    #[test]
    fn test_minion_died_payload() {
        let killer = Character::Minion(EntityId(9));
        let event = GameEvent::minion_died(EntityId(3), Some(killer));

        assert_eq!(event.kind, EventKind::MinionDied);
        assert_eq!(event.minion, Some(EntityId(3)));
        assert_eq!(event.character, Some(killer));

        let unattributed = GameEvent::minion_died(EntityId(3), None);
        assert_eq!(unattributed.character, None);
    }

    #[test]
    fn test_did_damage_payload() {
        let event = GameEvent::did_damage(4, Character::Hero(PlayerId::new(1)));
        assert_eq!(event.amount, 4);
        assert_eq!(event.character.and_then(Character::minion), None);
    }

    #[test]
    fn test_copied_payload() {
        let event = GameEvent::copied(EntityId(12), PlayerId::new(1));
        assert_eq!(event.minion, Some(EntityId(12)));
        assert_eq!(event.player, Some(PlayerId::new(1)));
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::minion_damaged(EntityId(10), 5);
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
