//! Per-player count of applied effects by type.
//!
//! Some effects toggle player-wide state (a flag, a shared listener). Several
//! instances of the same effect may be active at once; the state must turn on
//! with the first and off with the last. Callers increment *before* `apply`
//! and decrement *before* `unapply`, so inside those hooks a count of 1 means
//! "first instance" and a count of 0 means "last instance gone".

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::effect::EffectTag;

/// Counts of applied effects, keyed by effect type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRegistry {
    counts: FxHashMap<EffectTag, u32>,
}

impl EffectRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more applied instance. Returns the new count.
    pub fn increment(&mut self, tag: EffectTag) -> u32 {
        let count = self.counts.entry(tag).or_insert(0);
        *count += 1;
        *count
    }

    /// Record one fewer applied instance. Returns the new count.
    ///
    /// Saturates at zero.
    pub fn decrement(&mut self, tag: EffectTag) -> u32 {
        match self.counts.get_mut(&tag) {
            Some(count) if *count > 1 => {
                *count -= 1;
                *count
            }
            Some(_) => {
                self.counts.remove(&tag);
                0
            }
            None => 0,
        }
    }

    /// Currently applied instances of `tag`.
    #[must_use]
    pub fn count(&self, tag: EffectTag) -> u32 {
        self.counts.get(&tag).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_active(&self, tag: EffectTag) -> bool {
        self.count(tag) > 0
    }
}
