//! Projects.

use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ProjectId, UserId};

/// A crowdfunding project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub category: ProjectCategory,
    pub state: ProjectState,
    /// ISO 4217 code of the project's pledge currency.
    pub currency: String,
    pub creator_id: UserId,
    pub urls: ProjectUrls,
    /// Whether the campaign has ended but still accepts late pledges.
    #[serde(default)]
    pub is_in_post_campaign_phase: bool,
}

/// The category a project is filed under, as embedded in the project
/// payload (flattened, not the full graph node).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

impl ProjectCategory {
    /// Root of this category's tree: the parent id for subcategories,
    /// the category's own id otherwise.
    pub fn root_id(&self) -> CategoryId {
        self.parent_id.unwrap_or(self.id)
    }
}

/// Campaign lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectState {
    Live,
    Successful,
    Failed,
    Canceled,
    Suspended,
}

/// Web URLs published for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectUrls {
    pub web: WebUrls,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebUrls {
    pub project: String,
    #[serde(default)]
    pub updates: Option<String>,
}

/// How a project is addressed in a request: by id or by vanity slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectParam {
    Id(ProjectId),
    Slug(String),
}

impl std::fmt::Display for ProjectParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(slug) => write!(f, "{slug}"),
        }
    }
}
