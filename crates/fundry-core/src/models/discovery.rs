//! Discovery parameters and related value types.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::ids::ProjectId;
use super::project::Project;

/// Parameter set for a discovery query. `None` fields are simply not
/// sent; two parameter sets compare equal field-by-field, which is what
/// de-duplication in the discovery screen keys on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<DiscoverySort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_picks: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_to: Option<ProjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_potd: Option<bool>,
}

impl DiscoveryParams {
    /// The empty parameter set.
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Defaults for users who have recommendations enabled.
    pub fn recommended_defaults() -> Self {
        Self {
            recommended: Some(true),
            backed: Some(false),
            ..Self::default()
        }
    }
}

/// Discovery sort orders, in pager order. The pager's page index and the
/// sort-transition tie-break both key off positions in [`DiscoverySort::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoverySort {
    Magic,
    Popular,
    Newest,
    EndingSoon,
}

impl DiscoverySort {
    /// Every sort, in the order pages are laid out.
    pub const ALL: [DiscoverySort; 4] = [
        DiscoverySort::Magic,
        DiscoverySort::Popular,
        DiscoverySort::Newest,
        DiscoverySort::EndingSoon,
    ];

    /// Position of this sort in [`Self::ALL`].
    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|sort| *sort == self)
            .unwrap_or_default()
    }
}

/// Direction a paged container should animate when changing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationDirection {
    Forward,
    Reverse,
}

/// Where a navigation to a project originated, for attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefTag {
    Thanks,
    Discovery,
    Recommended,
}

impl RefTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Thanks => "thanks",
            Self::Discovery => "discovery",
            Self::Recommended => "recommended",
        }
    }
}

/// A page of discovery results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryEnvelope {
    pub projects: Vec<Project>,
}
