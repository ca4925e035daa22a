//! Charge aura membership.
//!
//! A charge aura grants charge in two tiers:
//!
//! - *temporary*: granted while the aura's source is in play, reverted when
//!   the aura is removed. A temporary member that gets silenced is promoted.
//! - *permanent*: promoted members keep charge after the aura is gone. A
//!   permanent member loses it again if silenced; a copy of it never gets it.
//!
//! Minions that already had charge when they joined are only *watched*: if
//! silence strips their own charge while the aura is up, they become
//! temporary members.
//!
//! A minion is in at most one tier at a time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::EntityId;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeTracker {
    temporary: BTreeSet<EntityId>,
    permanent: BTreeSet<EntityId>,
    watched: BTreeSet<EntityId>,
}

impl ChargeTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Is `minion` in either tier?
    #[must_use]
    pub fn contains(&self, minion: EntityId) -> bool {
        self.temporary.contains(&minion)
            || self.permanent.contains(&minion)
            || self.watched.contains(&minion)
    }

    #[must_use]
    pub fn is_temporary(&self, minion: EntityId) -> bool {
        self.temporary.contains(&minion)
    }

    #[must_use]
    pub fn is_permanent(&self, minion: EntityId) -> bool {
        self.permanent.contains(&minion)
    }

    #[must_use]
    pub fn is_watched(&self, minion: EntityId) -> bool {
        self.watched.contains(&minion)
    }

    /// Watch a natively charged minion.
    pub fn watch(&mut self, minion: EntityId) -> bool {
        if self.temporary.contains(&minion) || self.permanent.contains(&minion) {
            return false;
        }
        self.watched.insert(minion)
    }

    /// Turn a watched minion into a temporary member.
    pub fn adopt(&mut self, minion: EntityId) -> bool {
        if self.watched.remove(&minion) {
            self.temporary.insert(minion);
            true
        } else {
            false
        }
    }

    /// Start tracking `minion` as a temporary member.
    pub fn track_temporary(&mut self, minion: EntityId) -> bool {
        if self.permanent.contains(&minion) || self.watched.contains(&minion) {
            return false;
        }
        self.temporary.insert(minion)
    }

    /// Move `minion` from the temporary to the permanent tier.
    pub fn promote(&mut self, minion: EntityId) -> bool {
        if self.temporary.remove(&minion) {
            self.permanent.insert(minion);
            true
        } else {
            false
        }
    }

    /// Stop tracking a permanent member.
    pub fn release(&mut self, minion: EntityId) -> bool {
        self.permanent.remove(&minion)
    }

    /// Remove and return every temporary member.
    pub fn drain_temporary(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.temporary).into_iter().collect()
    }

    /// Remove and return every permanent member.
    pub fn drain_permanent(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.permanent).into_iter().collect()
    }

    /// Remove and return every watched minion.
    pub fn drain_watched(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.watched).into_iter().collect()
    }

    pub fn temporary(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.temporary.iter().copied()
    }

    pub fn permanent(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.permanent.iter().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.temporary.is_empty() && self.permanent.is_empty() && self.watched.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promote_moves_between_tiers() {
        let mut tracker = ChargeTracker::new();
        assert!(tracker.track_temporary(EntityId(3)));
        assert!(tracker.is_temporary(EntityId(3)));

        assert!(tracker.promote(EntityId(3)));
        assert!(!tracker.is_temporary(EntityId(3)));
        assert!(tracker.is_permanent(EntityId(3)));

        assert!(!tracker.promote(EntityId(3)));
    }

    #[test]
    fn test_permanent_member_not_retracked() {
        let mut tracker = ChargeTracker::new();
        tracker.track_temporary(EntityId(3));
        tracker.promote(EntityId(3));

        assert!(!tracker.track_temporary(EntityId(3)));
        assert!(tracker.contains(EntityId(3)));
    }

    #[test]
    fn test_adopt_watched_member() {
        let mut tracker = ChargeTracker::new();
        assert!(tracker.watch(EntityId(4)));
        assert!(tracker.contains(EntityId(4)));
        assert!(!tracker.track_temporary(EntityId(4)));

        assert!(tracker.adopt(EntityId(4)));
        assert!(!tracker.is_watched(EntityId(4)));
        assert!(tracker.is_temporary(EntityId(4)));
        assert!(!tracker.adopt(EntityId(4)));
    }

    #[test]
    fn test_release_and_drain() {
        let mut tracker = ChargeTracker::new();
        tracker.track_temporary(EntityId(1));
        tracker.track_temporary(EntityId(2));
        tracker.promote(EntityId(2));

        assert_eq!(tracker.drain_temporary(), vec![EntityId(1)]);
        assert!(tracker.release(EntityId(2)));
        assert!(!tracker.release(EntityId(2)));
        assert!(tracker.is_empty());
    }
}
