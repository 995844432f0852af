//! User accounts.

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// The authenticated user, as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub avatar: Avatar,
    pub newsletters: Newsletters,
    pub stats: UserStats,
    /// Tri-state: the backend omits this for accounts that never made a
    /// choice, and only an explicit `false` enables recommendations.
    #[serde(default)]
    pub opted_out_of_recommendations: Option<bool>,
}

/// Avatar image URLs by size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Avatar {
    pub small: String,
    pub medium: String,
    pub large: String,
}

/// Newsletter opt-ins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Newsletters {
    #[serde(default)]
    pub games: bool,
    #[serde(default)]
    pub weekly: bool,
    #[serde(default)]
    pub happening: bool,
}

/// Aggregate account counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub backed_projects_count: u32,
    #[serde(default)]
    pub created_projects_count: u32,
}
