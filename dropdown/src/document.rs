//! Page-level event surface shared by every widget on a page.
//!
//! The host forwards every pointer press and key press here (after giving the
//! target widget a chance to handle it). Open widgets subscribe for the
//! duration of their open state to notice outside clicks and dismissal keys.

use crate::events::{KeyEvent, PointerEvent};
use crate::listener::{ListenerSet, Subscription};

/// Document-level pointer and key listeners.
///
/// Cheap to clone; clones share the same listeners.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pointer: ListenerSet<PointerEvent>,
    keys: ListenerSet<KeyEvent>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for every pointer press on the page.
    #[must_use = "dropping the subscription immediately deregisters the listener"]
    pub fn on_pointer<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&PointerEvent) + Send + Sync + 'static,
    {
        self.pointer.subscribe(listener)
    }

    /// Listen for every key press on the page.
    #[must_use = "dropping the subscription immediately deregisters the listener"]
    pub fn on_key<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&KeyEvent) + Send + Sync + 'static,
    {
        self.keys.subscribe(listener)
    }

    /// Deliver a pointer press. Returns how many listeners saw it.
    pub fn dispatch_pointer(&self, event: &PointerEvent) -> usize {
        log::trace!("document pointer {:?}", event);
        self.pointer.emit(event)
    }

    /// Deliver a key press. Returns how many listeners saw it.
    pub fn dispatch_key(&self, event: &KeyEvent) -> usize {
        log::trace!("document key {:?}", event);
        self.keys.emit(event)
    }

    /// Total number of live listeners. Zero once every widget is closed.
    pub fn listener_count(&self) -> usize {
        self.pointer.len() + self.keys.len()
    }
}
