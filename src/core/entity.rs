//! Entity identification.
//!
//! Every minion that ever enters play gets a fresh `EntityId` from the game.
//! IDs are never reused, so a dead minion's record (and its deathrattle) can
//! still be looked up after it has left the board.
//!
//! ```
//! use ccg_effects::core::EntityId;
//!
//! let mut next = EntityId::FIRST;
//! let a = next.advance();
//! let b = next.advance();
//! assert_ne!(a, b);
//! assert_eq!(format!("{}", a), "Minion(1)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a minion in play (or that once was).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The first ID handed out by a fresh game.
    pub const FIRST: EntityId = EntityId(1);

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Return the current ID and step the counter forward.
    pub fn advance(&mut self) -> EntityId {
        let current = *self;
        self.0 += 1;
        current
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Minion({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_is_monotonic() {
        let mut next = EntityId::FIRST;
        let ids: Vec<_> = (0..4).map(|_| next.advance()).collect();
        assert_eq!(ids, vec![EntityId(1), EntityId(2), EntityId(3), EntityId(4)]);
        assert_eq!(next, EntityId(5));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Minion(42)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
