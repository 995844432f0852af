//! Recording analytics sink.

use parking_lot::Mutex;
use serde_json::Value;

use fundry_core::effects::analytics::AnalyticsEffects;

/// Records tracked events in order for assertions.
#[derive(Default)]
pub struct MemoryAnalytics {
    events: Mutex<Vec<(String, Value)>>,
}

impl MemoryAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Event names in tracking order.
    pub fn event_names(&self) -> Vec<String> {
        self.events.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    /// The value of `key` in each tracked event's properties, skipping
    /// events without it.
    pub fn property_values(&self, key: &str) -> Vec<Value> {
        self.events
            .lock()
            .iter()
            .filter_map(|(_, properties)| properties.get(key).cloned())
            .collect()
    }
}

impl AnalyticsEffects for MemoryAnalytics {
    fn track(&self, event: &str, properties: Value) {
        self.events.lock().push((event.to_string(), properties));
    }
}
