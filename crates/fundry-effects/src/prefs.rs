//! In-memory preference store.

use std::collections::HashMap;

use fundry_core::effects::prefs::PreferenceEffects;
use parking_lot::RwLock;

/// Process-local preference flags. Read-your-writes within the process;
/// persistence across launches is a platform concern layered on top.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    flags: RwLock<HashMap<String, bool>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a flag, for wiring up a known starting state.
    pub fn with_flag(self, key: &str, value: bool) -> Self {
        self.flags.write().insert(key.to_string(), value);
        self
    }
}

impl PreferenceEffects for MemoryPreferences {
    fn bool_flag(&self, key: &str) -> bool {
        self.flags.read().get(key).copied().unwrap_or(false)
    }

    fn set_bool_flag(&self, key: &str, value: bool) {
        self.flags.write().insert(key.to_string(), value);
    }
}
