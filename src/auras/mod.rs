//! Continuous effects.
//!
//! - [`AuraEngine`]: stat auras folded into minion stats at read time
//! - [`ChargeTracker`]: the charge aura's two-tier membership

mod aura;
mod charge;

pub use aura::{Aura, AuraEngine, AuraId, AuraPredicate};
pub use charge::ChargeTracker;
