//! Shared, observable access to a picker state.

use std::{fmt, sync::Arc};

use parking_lot::{Mutex, RwLock};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Identifies a listener registered with [`PickerHandle::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listeners<T> {
    next_id: u64,
    entries: Vec<(ListenerId, Listener<T>)>,
}

/// A picker state shared between an event loop and its observers.
///
/// Every mutation goes through [`with_mut`](Self::with_mut). Listeners run
/// after the mutation completes and receive a snapshot of the new value
/// taken under a short read lock, so no lock is held while they run and
/// they may read the handle freely. A listener that mutates the handle it
/// observes is called again for its own mutation.
pub struct PickerHandle<T> {
    state: Arc<RwLock<T>>,
    listeners: Arc<Mutex<Listeners<T>>>,
}

impl<T> Clone for PickerHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<T> PickerHandle<T> {
    /// Wraps `state`.
    pub fn new(state: T) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            listeners: Arc::new(Mutex::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    /// Execute a closure with a shared reference to the state.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.read())
    }

    /// Registers a listener called after every mutation.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> ListenerId {
        let mut listeners = self.listeners.lock();
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry, _)| *entry != id);
        listeners.entries.len() != before
    }
}

impl<T: Clone> PickerHandle<T> {
    /// Execute a closure with a mutable reference to the state, then notify
    /// listeners.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.state.write());
        self.notify();
        result
    }

    /// Get a cloned state.
    pub fn get(&self) -> T {
        self.with(Clone::clone)
    }

    /// Replace the state.
    pub fn set(&self, value: T) {
        self.with_mut(|slot| *slot = value);
    }

    fn notify(&self) {
        // Listener list and state are both copied out, so listeners may
        // subscribe, unsubscribe or read the handle.
        let listeners: Vec<Listener<T>> = self
            .listeners
            .lock()
            .entries
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        if listeners.is_empty() {
            return;
        }
        let snapshot = self.get();
        for listener in &listeners {
            listener(&snapshot);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PickerHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerHandle")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}
