//! Latest-wins input slots.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use super::core::{Signal, Sink};

/// A single-value holder for the most recent event of one kind.
///
/// Each view-model input is backed by a slot: recording stores the value
/// (replacing whatever was there; slots are cells, not queues) and
/// re-broadcasts it on [`Slot::signal`]. Recording never fails; whether a
/// composition reacts to an absent or nonsensical value is decided
/// downstream with `filter_map`, never here.
///
/// The version counter increments on every record, so tests and debug
/// tooling can distinguish "never recorded" from "recorded the default".
pub struct Slot<T> {
    latest: RwLock<Option<T>>,
    version: AtomicU64,
    signal: Signal<T>,
    sink: Sink<T>,
}

impl<T: Clone + Send + Sync + 'static> Slot<T> {
    /// Create an empty slot.
    pub fn new() -> Self {
        let (signal, sink) = Signal::pipe();
        Self {
            latest: RwLock::new(None),
            version: AtomicU64::new(0),
            signal,
            sink,
        }
    }

    /// Store `value` as the latest for this event kind and broadcast it.
    pub fn record(&self, value: T) {
        {
            let mut latest = self.latest.write();
            *latest = Some(value.clone());
        }
        self.version.fetch_add(1, Ordering::Release);
        self.sink.send(value);
    }

    /// The most recently recorded value, if any.
    pub fn latest(&self) -> Option<T> {
        self.latest.read().clone()
    }

    /// How many times this slot has been recorded.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// The broadcast side of the slot; derive outputs from this.
    pub fn signal(&self) -> Signal<T> {
        self.signal.clone()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + std::fmt::Debug + 'static> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("latest", &self.latest())
            .field("version", &self.version())
            .finish()
    }
}
