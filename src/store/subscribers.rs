use crate::core::Notification;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Callback receiving the full notification list after a mutation
pub type Listener = Arc<dyn Fn(&[Notification]) + Send + Sync>;

/// Identifier of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<SubscriptionId, Listener>,
}

/// Observer registry keyed by subscription id
#[derive(Default)]
pub struct Subscribers {
    inner: Arc<Mutex<Registry>>,
}

impl Subscribers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` and return the handle that removes it
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        let mut registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.insert(id, listener);

        tracing::debug!("Registered subscriber {:?}", id);
        Subscription {
            id,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Invoke every listener with `snapshot`
    ///
    /// Listeners run outside the lock so they may unsubscribe themselves.
    pub fn notify(&self, snapshot: &[Notification]) {
        let listeners: Vec<Listener> = {
            let registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            registry.listeners.values().cloned().collect()
        };

        for listener in listeners {
            listener(snapshot);
        }
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by `subscribe`
///
/// Dropping the handle keeps the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub const fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the listener; later calls are no-ops
    pub fn unsubscribe(&self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let removed = registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .remove(&self.id);
        if removed.is_some() {
            tracing::debug!("Removed subscriber {:?}", self.id);
        }
    }

    /// Turn the handle into a plain closure
    pub fn into_fn(self) -> impl Fn() + Send + Sync {
        move || self.unsubscribe()
    }
}
