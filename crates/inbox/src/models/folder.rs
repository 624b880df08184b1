//! Folder context and sort order

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which folder the list is currently showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Folder {
    /// Received messages
    #[default]
    Inbox,
    /// Sent messages
    Outbox,
}

impl Folder {
    /// Value of the `origin` query parameter on detail links
    pub fn origin(self) -> &'static str {
        match self {
            Folder::Inbox => "inbox",
            Folder::Outbox => "outbox",
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.origin())
    }
}

/// Date ordering of the rendered list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest first
    #[default]
    Descending,
    /// Oldest first
    Ascending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Descending => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
        }
    }

    pub fn is_descending(self) -> bool {
        self == SortOrder::Descending
    }
}
