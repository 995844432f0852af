//! Project updates (creator posts).

use serde::{Deserialize, Serialize};

use super::ids::{ProjectId, UpdateId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    pub id: UpdateId,
    /// 1-based position in the project's update feed.
    pub sequence: u32,
    pub title: String,
    pub project_id: ProjectId,
    #[serde(default)]
    pub is_public: bool,
}
