//! Stat auras.
//!
//! An aura is a continuous `+attack/+health` bonus a source minion gives to
//! other minions. Bonuses are never written into the affected minions; the
//! stat getters fold every aura whose member set contains the minion at read
//! time. Membership is kept current by the game (board scan on add, then
//! `minion_placed`/`minion_died` listeners on the watched players' buses), so
//! minions that arrive after the aura was added are covered too.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet};

use crate::cards::{MinionType, TypeFilter};
use crate::core::{EntityId, PlayerId};

/// Unique identifier for an aura.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuraId(pub u32);

impl std::fmt::Display for AuraId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Aura({})", self.0)
    }
}

/// Which minions an aura selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuraPredicate {
    Any,
    MinionType(MinionType),
}

impl AuraPredicate {
    #[must_use]
    pub fn matches(self, minion_type: MinionType) -> bool {
        match self {
            AuraPredicate::Any => true,
            AuraPredicate::MinionType(t) => t == minion_type,
        }
    }
}

impl From<TypeFilter> for AuraPredicate {
    fn from(filter: TypeFilter) -> Self {
        match filter {
            TypeFilter::All => AuraPredicate::Any,
            TypeFilter::Only(t) => AuraPredicate::MinionType(t),
        }
    }
}

/// A registered aura.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aura {
    pub id: AuraId,
    /// The minion projecting the aura. Never a member.
    pub source: EntityId,
    pub attack: i64,
    pub health: i64,
    /// Players whose boards the aura covers.
    pub players: SmallVec<[PlayerId; 2]>,
    pub predicate: AuraPredicate,
    /// Minions currently receiving the bonus.
    pub members: BTreeSet<EntityId>,
}

impl Aura {
    /// Would `minion` qualify, ignoring which board it is on?
    #[must_use]
    pub fn selects(&self, minion: EntityId, minion_type: MinionType) -> bool {
        minion != self.source && self.predicate.matches(minion_type)
    }

    #[must_use]
    pub fn covers(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }
}

/// All active auras.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuraEngine {
    auras: BTreeMap<AuraId, Aura>,
    next_id: u32,
}

impl AuraEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an aura with no members yet.
    pub fn insert(
        &mut self,
        source: EntityId,
        attack: i64,
        health: i64,
        players: &[PlayerId],
        predicate: AuraPredicate,
    ) -> AuraId {
        let id = AuraId(self.next_id);
        self.next_id += 1;
        self.auras.insert(
            id,
            Aura {
                id,
                source,
                attack,
                health,
                players: players.iter().copied().collect(),
                predicate,
                members: BTreeSet::new(),
            },
        );
        id
    }

    pub fn remove(&mut self, id: AuraId) -> Option<Aura> {
        self.auras.remove(&id)
    }

    #[must_use]
    pub fn get(&self, id: AuraId) -> Option<&Aura> {
        self.auras.get(&id)
    }

    pub fn get_mut(&mut self, id: AuraId) -> Option<&mut Aura> {
        self.auras.get_mut(&id)
    }

    /// Auras projected by `source`.
    pub fn from_source(&self, source: EntityId) -> impl Iterator<Item = &Aura> {
        self.auras.values().filter(move |a| a.source == source)
    }

    /// Summed `(attack, health)` bonus for `minion` across every aura.
    #[must_use]
    pub fn bonus(&self, minion: EntityId) -> (i64, i64) {
        self.auras
            .values()
            .filter(|a| a.members.contains(&minion))
            .fold((0, 0), |(attack, health), a| (attack + a.attack, health + a.health))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aura> {
        self.auras.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.auras.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.auras.is_empty()
    }
}
