//! Strongly-typed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

id_type!(
    /// A project.
    ProjectId
);
id_type!(
    /// A category node.
    CategoryId
);
id_type!(
    /// A user account.
    UserId
);
id_type!(
    /// A project update (creator post).
    UpdateId
);

impl CategoryId {
    /// Root id of the games category tree.
    pub const GAMES: CategoryId = CategoryId(12);
}
