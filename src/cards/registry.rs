//! Card registry for definition lookup.
//!
//! The registry is the minion factory: summon and resurrect effects only
//! carry a `CardId`, and the game turns it into a fresh minion through here.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use crate::error::{EngineError, Result};

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use ccg_effects::cards::{CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::minion(CardId::new(1), "Wisp", 0, 1, 1));
///
/// assert_eq!(registry.lookup(CardId::new(1)).unwrap().name, "Wisp");
/// assert!(registry.lookup(CardId::new(2)).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Panics if a card with the same ID already exists.
    pub fn register(&mut self, card: CardDefinition) {
        if self.cards.contains_key(&card.id) {
            panic!("Card with ID {:?} already registered", card.id);
        }
        self.cards.insert(card.id, card);
    }

    /// Register a card (builder pattern).
    #[must_use]
    pub fn with_card(mut self, card: CardDefinition) -> Self {
        self.register(card);
        self
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Get a card definition, failing with `CardNotFound`.
    pub fn lookup(&self, id: CardId) -> Result<&CardDefinition> {
        self.cards.get(&id).ok_or(EngineError::CardNotFound(id))
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register(CardDefinition::spell(CardId::new(1), "Frostbolt", 2));

        assert_eq!(registry.get(CardId::new(1)).unwrap().name, "Frostbolt");
        assert!(registry.get(CardId::new(99)).is_none());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(CardId::new(1)));
    }

    #[test]
    fn test_lookup_miss() {
        let registry = CardRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(
            registry.lookup(CardId::new(7)).unwrap_err(),
            EngineError::CardNotFound(CardId::new(7))
        );
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let _ = CardRegistry::new()
            .with_card(CardDefinition::spell(CardId::new(1), "A", 1))
            .with_card(CardDefinition::spell(CardId::new(1), "B", 1));
    }
}
