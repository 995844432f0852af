//! Test preference store.

use std::collections::HashMap;

use parking_lot::RwLock;

use fundry_core::effects::prefs::PreferenceEffects;

/// In-memory preference flags with seeding, mirroring the production
/// store closely enough that view-model behavior is identical.
#[derive(Default)]
pub struct TestPreferences {
    flags: RwLock<HashMap<String, bool>>,
}

impl TestPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(self, key: &str, value: bool) -> Self {
        self.flags.write().insert(key.to_string(), value);
        self
    }
}

impl PreferenceEffects for TestPreferences {
    fn bool_flag(&self, key: &str) -> bool {
        self.flags.read().get(key).copied().unwrap_or(false)
    }

    fn set_bool_flag(&self, key: &str, value: bool) {
        self.flags.write().insert(key.to_string(), value);
    }
}
