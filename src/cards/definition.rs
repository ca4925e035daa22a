//! Card definitions - static card data.
//!
//! A `CardDefinition` is what a card *is*: its cost, whether it is a minion,
//! spell or secret, and for minions the stats, tribe, keywords, deathrattle
//! and effects every copy starts with. Runtime state lives on `Minion`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::effects::{Deathrattle, EffectKind};
use crate::error::ConfigError;

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Minion tribe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MinionType {
    #[default]
    None,
    Beast,
    Murloc,
    Dragon,
    Giant,
    Demon,
    Pirate,
    Totem,
    Mech,
}

impl MinionType {
    /// Upper-case tribe name, as used in effect descriptions.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MinionType::None => "NONE",
            MinionType::Beast => "BEAST",
            MinionType::Murloc => "MURLOC",
            MinionType::Dragon => "DRAGON",
            MinionType::Giant => "GIANT",
            MinionType::Demon => "DEMON",
            MinionType::Pirate => "PIRATE",
            MinionType::Totem => "TOTEM",
            MinionType::Mech => "MECH",
        }
    }
}

impl FromStr for MinionType {
    type Err = ConfigError;

    /// Case-insensitive tribe lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Ok(MinionType::None),
            "BEAST" => Ok(MinionType::Beast),
            "MURLOC" => Ok(MinionType::Murloc),
            "DRAGON" => Ok(MinionType::Dragon),
            "GIANT" => Ok(MinionType::Giant),
            "DEMON" => Ok(MinionType::Demon),
            "PIRATE" => Ok(MinionType::Pirate),
            "TOTEM" => Ok(MinionType::Totem),
            "MECH" => Ok(MinionType::Mech),
            _ => Err(ConfigError::UnknownMinionType(s.to_string())),
        }
    }
}

impl std::fmt::Display for MinionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tribe restriction on an aura or trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeFilter {
    /// Any tribe, including none.
    #[default]
    All,
    /// Exactly this tribe.
    Only(MinionType),
}

impl TypeFilter {
    /// Does a minion of `minion_type` pass?
    #[must_use]
    pub fn matches(self, minion_type: MinionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => t == minion_type,
        }
    }
}

impl std::fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeFilter::All => f.write_str("ALL"),
            TypeFilter::Only(t) => f.write_str(t.as_str()),
        }
    }
}

/// What a minion card puts into play.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinionStats {
    pub attack: i64,
    pub health: i64,
    pub minion_type: MinionType,
    pub battlecry: bool,
    pub charge: bool,
    pub deathrattle: Option<Deathrattle>,
    /// Effects every copy of the minion carries while in play.
    pub effects: Vec<EffectKind>,
}

/// Card category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Minion(MinionStats),
    Spell,
    /// Secrets are spells that stay hidden until triggered.
    Secret,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use ccg_effects::cards::{CardDefinition, CardId, MinionType};
///
/// let raptor = CardDefinition::minion(CardId::new(1), "Bloodfen Raptor", 2, 3, 2)
///     .with_minion_type(MinionType::Beast);
///
/// assert!(raptor.is_minion());
/// assert!(!raptor.is_spell());
/// assert_eq!(raptor.minion_stats().unwrap().attack, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Printed mana cost, before filters.
    pub cost: i64,

    /// Minion, spell or secret.
    pub kind: CardKind,
}

impl CardDefinition {
    /// Create a minion card.
    pub fn minion(id: CardId, name: impl Into<String>, cost: i64, attack: i64, health: i64) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind: CardKind::Minion(MinionStats {
                attack,
                health,
                ..MinionStats::default()
            }),
        }
    }

    /// Create a spell card.
    pub fn spell(id: CardId, name: impl Into<String>, cost: i64) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind: CardKind::Spell,
        }
    }

    /// Create a secret card.
    pub fn secret(id: CardId, name: impl Into<String>, cost: i64) -> Self {
        Self {
            id,
            name: name.into(),
            cost,
            kind: CardKind::Secret,
        }
    }

    fn stats_mut(&mut self) -> Option<&mut MinionStats> {
        match &mut self.kind {
            CardKind::Minion(stats) => Some(stats),
            _ => None,
        }
    }

    /// Set the tribe (minions only; ignored otherwise).
    #[must_use]
    pub fn with_minion_type(mut self, minion_type: MinionType) -> Self {
        if let Some(stats) = self.stats_mut() {
            stats.minion_type = minion_type;
        }
        self
    }

    /// Mark the minion as having a battlecry.
    #[must_use]
    pub fn with_battlecry(mut self) -> Self {
        if let Some(stats) = self.stats_mut() {
            stats.battlecry = true;
        }
        self
    }

    /// Give the minion charge.
    #[must_use]
    pub fn with_charge(mut self) -> Self {
        if let Some(stats) = self.stats_mut() {
            stats.charge = true;
        }
        self
    }

    /// Set the printed deathrattle.
    #[must_use]
    pub fn with_deathrattle(mut self, deathrattle: Deathrattle) -> Self {
        if let Some(stats) = self.stats_mut() {
            stats.deathrattle = Some(deathrattle);
        }
        self
    }

    /// Add an effect carried by every copy of the minion.
    #[must_use]
    pub fn with_effect(mut self, effect: EffectKind) -> Self {
        if let Some(stats) = self.stats_mut() {
            stats.effects.push(effect);
        }
        self
    }

    /// Minion stats, if this is a minion card.
    #[must_use]
    pub fn minion_stats(&self) -> Option<&MinionStats> {
        match &self.kind {
            CardKind::Minion(stats) => Some(stats),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_minion(&self) -> bool {
        matches!(self.kind, CardKind::Minion(_))
    }

    /// Spells and secrets both count as spells.
    #[must_use]
    pub fn is_spell(&self) -> bool {
        matches!(self.kind, CardKind::Spell | CardKind::Secret)
    }

    #[must_use]
    pub fn is_secret(&self) -> bool {
        matches!(self.kind, CardKind::Secret)
    }

    /// A minion card whose minion has a battlecry.
    #[must_use]
    pub fn has_battlecry(&self) -> bool {
        self.minion_stats().is_some_and(|s| s.battlecry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_minion_builder() {
        let card = CardDefinition::minion(CardId::new(1), "Wolf", 1, 1, 1)
            .with_minion_type(MinionType::Beast)
            .with_charge()
            .with_battlecry();

        let stats = card.minion_stats().unwrap();
        assert_eq!(stats.minion_type, MinionType::Beast);
        assert!(stats.charge);
        assert!(card.has_battlecry());
    }

    #[test]
    fn test_spell_categories() {
        let spell = CardDefinition::spell(CardId::new(2), "Fireball", 4);
        let secret = CardDefinition::secret(CardId::new(3), "Mirror Entity", 3);

        assert!(spell.is_spell());
        assert!(!spell.is_secret());
        assert!(secret.is_spell());
        assert!(secret.is_secret());
        assert!(!secret.has_battlecry());
    }

    #[test]
    fn test_minion_builders_ignored_on_spells() {
        let spell = CardDefinition::spell(CardId::new(2), "Fireball", 4).with_charge();
        assert!(spell.minion_stats().is_none());
    }

    #[test]
    fn test_minion_type_parse() {
        assert_eq!("beast".parse::<MinionType>(), Ok(MinionType::Beast));
        assert_eq!("MURLOC".parse::<MinionType>(), Ok(MinionType::Murloc));
        assert!("elemental".parse::<MinionType>().is_err());
    }

    #[test]
    fn test_type_filter() {
        assert!(TypeFilter::All.matches(MinionType::None));
        assert!(TypeFilter::Only(MinionType::Beast).matches(MinionType::Beast));
        assert!(!TypeFilter::Only(MinionType::Beast).matches(MinionType::Demon));
        assert_eq!(TypeFilter::Only(MinionType::Pirate).to_string(), "PIRATE");
    }
}
