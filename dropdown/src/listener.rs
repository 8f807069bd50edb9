//! Listener registration with scoped release.
//!
//! [`ListenerSet::subscribe`] hands back a [`Subscription`]. The listener stays
//! registered exactly as long as the subscription is alive: dropping it (or
//! calling [`Subscription::release`]) deregisters the listener. This is what
//! ties document-level listeners to a widget's open state and to its lifetime.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// A registered callback.
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Unique identifier for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__listener_{}", self.0)
    }
}

struct ListenerSetInner<E> {
    listeners: BTreeMap<ListenerId, Listener<E>>,
}

/// An ordered set of listeners for events of type `E`.
///
/// Cheap to clone; clones share the same set.
pub struct ListenerSet<E> {
    inner: Arc<RwLock<ListenerSetInner<E>>>,
}

impl<E: 'static> ListenerSet<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ListenerSetInner {
                listeners: BTreeMap::new(),
            })),
        }
    }

    /// Register a listener. It is removed when the returned handle drops.
    #[must_use = "dropping the subscription immediately deregisters the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = ListenerId::new();
        if let Ok(mut guard) = self.inner.write() {
            guard.listeners.insert(id, Arc::new(listener));
        }
        log::trace!("listener {} registered", id);

        let weak = Arc::downgrade(&self.inner);
        Subscription {
            id,
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade()
                    && let Ok(mut guard) = inner.write()
                {
                    guard.listeners.remove(&id);
                    log::trace!("listener {} released", id);
                }
            })),
        }
    }

    /// Deliver an event to every registered listener in registration order.
    ///
    /// No lock is held while listeners run, so a listener may subscribe or
    /// release (its own or another) subscription. A listener released by an
    /// earlier listener of the same dispatch is skipped.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&self, event: &E) -> usize {
        let snapshot: Vec<(ListenerId, Listener<E>)> = match self.inner.read() {
            Ok(guard) => guard
                .listeners
                .iter()
                .map(|(id, l)| (*id, Arc::clone(l)))
                .collect(),
            Err(_) => return 0,
        };

        let mut invoked = 0;
        for (id, listener) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            listener(event);
            invoked += 1;
        }
        invoked
    }

    /// Check whether a listener is still registered.
    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.inner
            .read()
            .map(|guard| guard.listeners.contains_key(&id))
            .unwrap_or(false)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.listeners.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: 'static> Default for ListenerSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for ListenerSet<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E> fmt::Debug for ListenerSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.inner.read().map(|g| g.listeners.len()).unwrap_or(0);
        f.debug_struct("ListenerSet")
            .field("listeners", &count)
            .finish()
    }
}

/// Handle to a registered listener. Deregisters on drop.
pub struct Subscription {
    id: ListenerId,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Deregister the listener now.
    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
