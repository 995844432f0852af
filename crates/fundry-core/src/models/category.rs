//! Category graph nodes.

use serde::{Deserialize, Serialize};

use super::ids::CategoryId;

/// A category as returned by the category endpoint: the node itself plus
/// its parent when it is a subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Present only for subcategories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<Category>>,
}

impl Category {
    /// The root of this node's tree: its parent when it has one,
    /// otherwise the node itself.
    pub fn root(&self) -> &Category {
        self.parent.as_deref().unwrap_or(self)
    }

    /// Consume the node, returning its root.
    pub fn into_root(self) -> Category {
        match self.parent {
            Some(parent) => *parent,
            None => self,
        }
    }
}
