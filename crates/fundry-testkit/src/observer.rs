//! Signal assertion helper.

use std::sync::Arc;

use parking_lot::Mutex;

use fundry_core::signal::Signal;

/// Collects every value a signal emits after [`TestObserver::observe`]
/// is called, for later assertions.
pub struct TestObserver<T> {
    values: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone + Send + Sync + 'static> TestObserver<T> {
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Attach to a signal. May be called on several signals to merge
    /// their emissions into one observer, mirroring how bindings fan in.
    pub fn observe(&self, signal: &Signal<T>) {
        let values = self.values.clone();
        signal.observe(move |value| values.lock().push(value.clone()));
    }

    /// Everything emitted so far, in order.
    pub fn values(&self) -> Vec<T> {
        self.values.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }

    /// The most recent emission, if any.
    pub fn last(&self) -> Option<T> {
        self.values.lock().last().cloned()
    }
}

impl<T: Clone + Send + Sync + PartialEq + std::fmt::Debug + 'static> TestObserver<T> {
    /// Assert the exact emission history.
    #[track_caller]
    pub fn assert_values(&self, expected: &[T]) {
        assert_eq!(self.values.lock().as_slice(), expected);
    }

    /// Assert how many values were emitted, with a context message.
    #[track_caller]
    pub fn assert_value_count(&self, expected: usize, message: &str) {
        assert_eq!(self.values.lock().len(), expected, "{message}");
    }

    /// Assert nothing was emitted.
    #[track_caller]
    pub fn assert_did_not_emit(&self, message: &str) {
        assert!(self.values.lock().is_empty(), "{message}");
    }
}

impl<T: Clone + Send + Sync + 'static> Default for TestObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}
