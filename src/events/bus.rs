//! Per-entity event bus.
//!
//! An `EventBus` maps each event kind to an ordered list of listeners. Handlers
//! are plain values (`H: Clone + PartialEq`), so `unbind` can find a listener
//! by structural equality and the whole bus can be cloned or serialized along
//! with the game.
//!
//! ## Dispatch
//!
//! The bus only stores listeners. Dispatch lives in [`EventHost::publish`],
//! because a handler needs mutable access to the whole game (including other
//! buses, and the very bus being published on). The contract:
//!
//! - Listeners fire in registration order.
//! - The listener list is snapshotted when the publish starts. Binds and
//!   unbinds made by handlers during the publish only affect later publishes,
//!   so a handler unbinding itself never makes the next listener get skipped.
//! - A `bind_once` listener is removed from the live list before it is
//!   invoked, so it fires at most once even if its handler publishes the same
//!   event again.
//! - Nested publishes run to completion before the outer publish continues.
//! - The first handler error aborts the rest of the publish and propagates.

use log::trace;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::event::{EventKind, GameEvent};

/// Identifies one registration on one bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

/// A registered handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listener<H> {
    pub id: ListenerId,
    pub handler: H,
    /// Removed when it first fires.
    pub once: bool,
}

/// Snapshot taken at the start of a publish.
pub type ListenerSnapshot<H> = SmallVec<[Listener<H>; 4]>;

/// Named-event subscription list for one entity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventBus<H> {
    listeners: FxHashMap<EventKind, Vec<Listener<H>>>,
    next_id: u64,
}

impl<H> Default for EventBus<H> {
    fn default() -> Self {
        Self {
            listeners: FxHashMap::default(),
            next_id: 0,
        }
    }
}

impl<H: Clone + PartialEq> EventBus<H> {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, event: EventKind, handler: H, once: bool) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event)
            .or_default()
            .push(Listener { id, handler, once });
        id
    }

    /// Append a listener. Duplicates are allowed.
    pub fn bind(&mut self, event: EventKind, handler: H) -> ListenerId {
        self.push(event, handler, false)
    }

    /// Append a listener that removes itself when it first fires.
    pub fn bind_once(&mut self, event: EventKind, handler: H) -> ListenerId {
        self.push(event, handler, true)
    }

    /// Remove the first listener whose handler equals `handler`.
    ///
    /// Returns `false` (and does nothing) when no such listener is bound.
    pub fn unbind(&mut self, event: EventKind, handler: &H) -> bool {
        let Some(list) = self.listeners.get_mut(&event) else {
            return false;
        };
        let Some(index) = list.iter().position(|l| &l.handler == handler) else {
            return false;
        };
        list.remove(index);
        if list.is_empty() {
            self.listeners.remove(&event);
        }
        true
    }

    /// Remove one specific registration.
    pub fn remove_listener(&mut self, event: EventKind, id: ListenerId) -> bool {
        let Some(list) = self.listeners.get_mut(&event) else {
            return false;
        };
        let Some(index) = list.iter().position(|l| l.id == id) else {
            return false;
        };
        list.remove(index);
        if list.is_empty() {
            self.listeners.remove(&event);
        }
        true
    }

    /// Is `handler` bound to `event` at least once?
    #[must_use]
    pub fn is_bound(&self, event: EventKind, handler: &H) -> bool {
        self.listeners(event).iter().any(|l| &l.handler == handler)
    }

    /// Current listeners for `event`, in firing order.
    #[must_use]
    pub fn listeners(&self, event: EventKind) -> &[Listener<H>] {
        self.listeners.get(&event).map_or(&[], Vec::as_slice)
    }

    /// Number of listeners for `event`.
    #[must_use]
    pub fn listener_count(&self, event: EventKind) -> usize {
        self.listeners(event).len()
    }

    /// Total listeners across all events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Copy of the listeners for `event`, taken at publish time.
    #[must_use]
    pub fn snapshot(&self, event: EventKind) -> ListenerSnapshot<H> {
        self.listeners(event).iter().cloned().collect()
    }

    /// Drop every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

/// Something that owns event buses and knows how to run their handlers.
///
/// Implementors supply bus lookup and handler invocation; `publish` supplies
/// the snapshot/ordering/once contract described in the module docs.
pub trait EventHost {
    /// Names the bus to publish on.
    type Source: Copy + std::fmt::Debug;
    /// Handler value stored on the buses.
    type Handler: Clone + PartialEq + std::fmt::Debug;
    /// Error a handler can raise.
    type Error;

    /// The bus owned by `source`, if it still exists.
    fn bus_mut(&mut self, source: Self::Source) -> Option<&mut EventBus<Self::Handler>>;

    /// Run one handler.
    fn invoke(
        &mut self,
        source: Self::Source,
        handler: &Self::Handler,
        event: &GameEvent,
    ) -> Result<(), Self::Error>;

    /// Invoke every listener bound to `event.kind` on `source`'s bus.
    ///
    /// Publishing on a source with no bus or no listeners is a no-op.
    fn publish(&mut self, source: Self::Source, event: &GameEvent) -> Result<(), Self::Error> {
        let snapshot = match self.bus_mut(source) {
            Some(bus) => bus.snapshot(event.kind),
            None => return Ok(()),
        };

        for listener in snapshot {
            if listener.once {
                if let Some(bus) = self.bus_mut(source) {
                    bus.remove_listener(event.kind, listener.id);
                }
            }
            trace!("{:?} {} -> {:?}", source, event.kind, listener.handler);
            self.invoke(source, &listener.handler, event)?;
        }
        Ok(())
    }
}
