//! Blog roll entries: other blogs worth following

use serde::{Deserialize, Serialize};

/// A link to another blog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogRoll {
    pub id: u64,
    pub name: String,
    pub url: String,
    /// Manual ordering, lowest first
    pub sort_order: u32,
    pub description: String,
    /// Free text such as "friend" or "co-worker"
    pub relationship: String,
}

impl BlogRoll {
    /// Create an entry; the store assigns the id when it is added
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            url: url.into(),
            sort_order: 0,
            description: String::new(),
            relationship: String::new(),
        }
    }

    /// A blog roll entry links straight to the other blog
    pub fn absolute_url(&self) -> &str {
        &self.url
    }
}
