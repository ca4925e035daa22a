//! The game the effects act on.
//!
//! ## Key Types
//!
//! - [`Game`]: Arena owning players, minions, effects, auras and every bus
//! - [`Minion`]: A minion's stats, keywords, deathrattle and bus
//! - [`Player`]: Board, hand, deck, secrets, mana filters, effect counts
//! - [`Handler`] / [`EventSource`]: Listener values and bus names

mod actions;
mod handler;
mod minion;
mod player;
mod state;

pub use handler::{EventSource, Handler};
pub use minion::Minion;
pub use player::Player;
pub use state::Game;
