//! Rewards.

use serde::{Deserialize, Serialize};

/// A reward tier on a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: u64,
    /// Minimum pledge for this tier.
    pub minimum: f64,
    #[serde(default)]
    pub title: Option<String>,
}

impl Reward {
    /// The implicit "pledge without a reward" tier.
    pub fn no_reward() -> Self {
        Self {
            id: 0,
            minimum: 1.0,
            title: None,
        }
    }

    pub fn is_no_reward(&self) -> bool {
        self.id == 0
    }
}
