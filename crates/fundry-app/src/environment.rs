//! The shared application environment.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde_json::Value;
use uuid::Uuid;

use fundry_core::effects::analytics::AnalyticsEffects;
use fundry_core::effects::api::ApiService;
use fundry_core::effects::prefs::PreferenceEffects;
use fundry_core::effects::task::TaskEffects;
use fundry_core::models::User;

use crate::config::AppConfig;
use crate::notifications::NotificationCenter;

/// The effect handlers an environment is wired with.
pub struct Services {
    pub api: Arc<dyn ApiService>,
    pub analytics: Arc<dyn AnalyticsEffects>,
    pub prefs: Arc<dyn PreferenceEffects>,
    pub tasks: Arc<dyn TaskEffects>,
}

/// Process-wide shared context: current user, locale/config, feature
/// flags, effect handlers, notifications.
///
/// There is exactly one per process and it is passed explicitly (by
/// `Arc`) into every view-model constructor; there is no hidden global. Mutable
/// state is multi-reader: readers take a fresh snapshot on every read
/// and never cache across a mutation boundary. Each piece of mutable
/// state has a single documented write path (`replace_current_user`,
/// `set_feature`).
pub struct AppEnvironment {
    services: Services,
    notifications: NotificationCenter,
    config: AppConfig,
    current_user: RwLock<Option<User>>,
    features: RwLock<HashMap<String, bool>>,
    rng: Mutex<ChaCha20Rng>,
    session_id: Uuid,
}

impl AppEnvironment {
    /// Build an environment with a randomly seeded shuffle RNG.
    pub fn new(services: Services, config: AppConfig) -> Arc<Self> {
        Self::with_seed(services, config, rand::random())
    }

    /// Build an environment with a fixed shuffle seed (deterministic
    /// recommendation ordering; used by tests and simulators).
    pub fn with_seed(services: Services, config: AppConfig, seed: [u8; 32]) -> Arc<Self> {
        let features = config.features.clone();
        Arc::new(Self {
            services,
            notifications: NotificationCenter::new(),
            config,
            current_user: RwLock::new(None),
            features: RwLock::new(features),
            rng: Mutex::new(ChaCha20Rng::from_seed(seed)),
            session_id: Uuid::new_v4(),
        })
    }

    pub fn api(&self) -> &Arc<dyn ApiService> {
        &self.services.api
    }

    pub fn prefs(&self) -> &Arc<dyn PreferenceEffects> {
        &self.services.prefs
    }

    pub fn tasks(&self) -> &Arc<dyn TaskEffects> {
        &self.services.tasks
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn country_code(&self) -> &str {
        &self.config.country_code
    }

    /// Snapshot of the current authenticated user.
    pub fn current_user(&self) -> Option<User> {
        self.current_user.read().clone()
    }

    /// Replace the current user. The single documented write path for
    /// the user cell; callers follow up by feeding a "user updated"
    /// acknowledgment into any view-model that derives from the user.
    pub fn replace_current_user(&self, user: User) {
        *self.current_user.write() = Some(user);
    }

    /// Clear the current user (logout).
    pub fn clear_current_user(&self) {
        *self.current_user.write() = None;
    }

    /// Evaluate a feature flag; unknown flags are off.
    pub fn feature(&self, name: &str) -> bool {
        self.features.read().get(name).copied().unwrap_or(false)
    }

    /// Override a feature flag at runtime (remote-config delivery).
    pub fn set_feature(&self, name: &str, enabled: bool) {
        self.features.write().insert(name.to_string(), enabled);
    }

    /// Uniformly shuffle `items` with the environment RNG.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        items.shuffle(&mut *self.rng.lock());
    }

    /// Record an analytics event, stamping the session id into the
    /// properties.
    pub fn track(&self, event: &str, properties: Value) {
        let mut properties = match properties {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => {
                let mut map = serde_json::Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        properties.insert(
            "session_id".to_string(),
            Value::String(self.session_id.to_string()),
        );
        self.services.analytics.track(event, Value::Object(properties));
    }
}
