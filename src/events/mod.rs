//! Publish/subscribe layer.
//!
//! Every minion, every player and the game itself own an [`EventBus`]. The
//! turn driver and the game's mutation methods publish [`GameEvent`]s on the
//! relevant bus; applied effects are the subscribers.
//!
//! ## Key Components
//!
//! - [`EventKind`]: The event vocabulary (`turn_ended`, `minion_died`, ...)
//! - [`GameEvent`]: A published event with its payload
//! - [`EventBus`]: Ordered listener lists with `bind`/`bind_once`/`unbind`
//! - [`EventHost`]: Reentrant snapshot dispatch over a family of buses

mod event;
mod bus;

pub use event::{Character, EventKind, GameEvent};
pub use bus::{EventBus, EventHost, Listener, ListenerId, ListenerSnapshot};
