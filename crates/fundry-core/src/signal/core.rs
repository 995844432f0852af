//! Signal and sink: the event bus the rest of the module builds on.

use parking_lot::RwLock;
use std::sync::Arc;

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Core<T> {
    observers: RwLock<Vec<Observer<T>>>,
}

impl<T> Core<T> {
    fn new() -> Self {
        Self {
            observers: RwLock::new(Vec::new()),
        }
    }
}

/// An observable stream of values.
///
/// Signals are handles: cloning one yields another handle onto the same
/// observer list. A signal holds no value of its own: observers only see
/// values sent after they attach. Operators that need "the latest value"
/// (sampling, combination) keep that state themselves.
pub struct Signal<T> {
    core: Arc<Core<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

/// The sending half of a signal pipe.
pub struct Sink<T> {
    core: Arc<Core<T>>,
}

impl<T> Clone for Sink<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> Signal<T> {
    /// Create a connected signal/sink pair.
    pub fn pipe() -> (Signal<T>, Sink<T>) {
        let core = Arc::new(Core::new());
        (
            Signal { core: core.clone() },
            Sink { core },
        )
    }

    /// A signal that never emits.
    pub fn never() -> Signal<T> {
        Signal {
            core: Arc::new(Core::new()),
        }
    }

    /// Attach an observer. Observers stay attached for the life of the
    /// signal graph; a view-model's graph is torn down by dropping the
    /// view-model.
    pub fn observe<F>(&self, f: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.core.observers.write().push(Arc::new(f));
    }

    #[cfg(test)]
    fn observer_count(&self) -> usize {
        self.core.observers.read().len()
    }
}

impl<T: Send + Sync + 'static> Sink<T> {
    /// Push a value to every observer, synchronously, in attach order.
    ///
    /// The observer list is snapshotted before dispatch, so observers may
    /// send into other signals, including later stages of the same graph,
    /// without deadlocking.
    pub fn send(&self, value: T) {
        let observers: Vec<Observer<T>> = self.core.observers.read().clone();
        for observer in &observers {
            observer(&value);
        }
    }
}
