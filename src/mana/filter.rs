//! Mana filters.
//!
//! A player owns an ordered chain of cost adjustments. Each entry applies to
//! the cards its predicate matches and clamps to its own floor before the
//! next entry runs:
//!
//! ```text
//! cost = base
//! for entry in chain (registration order) where entry matches card:
//!     cost = max(cost + entry.amount, entry.minimum)
//! effective = max(cost, 0)
//! ```
//!
//! Because every entry clamps independently, a later filter can raise the cost
//! back above an earlier filter's floor.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::cards::CardDefinition;
use crate::error::ConfigError;

/// Identifies one logical filter. An effect that filters both players pushes
/// the same `FilterId` onto both chains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterId(pub u32);

impl std::fmt::Display for FilterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Filter({})", self.0)
    }
}

/// Which cards a filter applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFilter {
    /// Every card.
    #[default]
    Card,
    Minion,
    /// Spells, secrets included.
    Spell,
    Secret,
    /// Minions with a battlecry.
    BattlecryMinion,
}

impl CardFilter {
    #[must_use]
    pub fn matches(self, card: &CardDefinition) -> bool {
        match self {
            CardFilter::Card => true,
            CardFilter::Minion => card.is_minion(),
            CardFilter::Spell => card.is_spell(),
            CardFilter::Secret => card.is_secret(),
            CardFilter::BattlecryMinion => card.has_battlecry(),
        }
    }

    /// The option string used in effect definitions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CardFilter::Card => "card",
            CardFilter::Minion => "minion",
            CardFilter::Spell => "spell",
            CardFilter::Secret => "secret",
            CardFilter::BattlecryMinion => "battlecry",
        }
    }
}

impl FromStr for CardFilter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(CardFilter::Card),
            "minion" => Ok(CardFilter::Minion),
            "spell" => Ok(CardFilter::Spell),
            "secret" => Ok(CardFilter::Secret),
            "battlecry" => Ok(CardFilter::BattlecryMinion),
            other => Err(ConfigError::InvalidCardFilter(other.to_string())),
        }
    }
}

impl std::fmt::Display for CardFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cost adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaFilterEntry {
    pub id: FilterId,
    /// Added to the running cost (negative makes cards cheaper).
    pub amount: i64,
    /// This entry never takes the cost below this floor.
    pub minimum: i64,
    pub predicate: CardFilter,
}

impl ManaFilterEntry {
    #[must_use]
    pub fn new(id: FilterId, amount: i64, minimum: i64, predicate: CardFilter) -> Self {
        Self {
            id,
            amount,
            minimum,
            predicate,
        }
    }

    /// One fold step.
    #[must_use]
    pub fn adjust(&self, cost: i64, card: &CardDefinition) -> i64 {
        if self.predicate.matches(card) {
            (cost + self.amount).max(self.minimum)
        } else {
            cost
        }
    }
}

/// A player's ordered filter list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaFilterChain {
    entries: Vec<ManaFilterEntry>,
}

impl ManaFilterChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry; it runs after every entry already present.
    pub fn push(&mut self, entry: ManaFilterEntry) {
        self.entries.push(entry);
    }

    /// Remove the first entry with `id`. Missing ids are a no-op.
    pub fn remove(&mut self, id: FilterId) -> bool {
        match self.entries.iter().position(|e| e.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, id: FilterId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    #[must_use]
    pub fn entries(&self) -> &[ManaFilterEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Left-fold the chain over the card's printed cost, then floor at 0.
    #[must_use]
    pub fn effective_cost(&self, card: &CardDefinition) -> i64 {
        self.entries
            .iter()
            .fold(card.cost, |cost, entry| entry.adjust(cost, card))
            .max(0)
    }
}
