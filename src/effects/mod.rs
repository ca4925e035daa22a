//! Persistent effects attached to minions.
//!
//! - [`EffectKind`]: what an effect does, with its option selectors
//! - [`EffectInstance`]: an attached effect and the bookkeeping it needs to
//!   undo itself
//! - [`EffectRegistry`]: per-player counts that gate player-wide effects
//! - [`Deathrattle`]: the chainable deathrattle slot value
//!
//! ## Lifecycle
//!
//! `apply` installs hooks and `unapply` removes exactly those hooks. Effects
//! carry no back-reference to the game: the game passes itself into the
//! lifecycle and listener calls.

mod deathrattle;
mod effect;
mod instance;
mod registry;
pub(crate) mod resolver;
mod targeting;

pub use deathrattle::{Deathrattle, DeathrattleAction};
pub use effect::{BuffSpec, EffectKind, EffectTag};
pub use instance::{EffectAction, EffectId, EffectInstance, EffectState};
pub use registry::EffectRegistry;
pub use targeting::{BuffTarget, BuffWhen, MinionFilter, TurnEdge};
