use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::listener::{ListenerSet, Subscription};

/// Observable state container with interior mutability.
///
/// `State<T>` is cheap to clone and shared between clones. Every `set` or
/// `update` marks it dirty and notifies watchers with the new value, so a
/// host can either poll [`is_dirty`](Self::is_dirty) once per frame or react
/// to changes through [`watch`](Self::watch).
///
/// # Example
///
/// ```
/// use dropdown::state::State;
///
/// let category = State::new(None::<String>);
/// let _watch = category.watch(|v| println!("category is now {:?}", v));
/// category.set(Some("Инвалид".to_string()));
/// assert!(category.is_dirty());
/// ```
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
    dirty: Arc<AtomicBool>,
    watchers: ListenerSet<T>,
}

impl<T: 'static> State<T> {
    /// Create a new state with the given value
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
            dirty: Arc::new(AtomicBool::new(false)),
            watchers: ListenerSet::new(),
        }
    }

    /// Get a clone of the current value
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Read the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    /// Set a new value
    pub fn set(&self, value: T)
    where
        T: Clone,
    {
        self.update(|v| *v = value);
    }

    /// Update the value using a closure
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
        T: Clone,
    {
        let snapshot = match self.inner.write() {
            Ok(mut guard) => {
                f(&mut guard);
                self.dirty.store(true, Ordering::SeqCst);
                guard.clone()
            }
            Err(_) => return,
        };
        // Watchers run after the write lock is gone so they may read or
        // write this state again.
        self.watchers.emit(&snapshot);
    }

    /// Call `f` with the new value after every change.
    #[must_use = "dropping the subscription immediately stops watching"]
    pub fn watch<F>(&self, f: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.watchers.subscribe(f)
    }

    /// Check if the state has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            watchers: self.watchers.clone(),
        }
    }
}

impl<T: Default + 'static> Default for State<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
