//! Card system: definitions and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `CardDefinition`: Cost, category and (for minions) starting stats
//! - `MinionType` / `TypeFilter`: Tribes and tribe restrictions
//! - `CardRegistry`: Definition lookup; the minion factory

pub mod definition;
pub mod registry;

pub use definition::{CardDefinition, CardId, CardKind, MinionStats, MinionType, TypeFilter};
pub use registry::CardRegistry;
