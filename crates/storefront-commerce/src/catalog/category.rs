//! Menu categories.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A menu category (e.g. "Main Course").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Sort order position in the navigation.
    #[serde(default)]
    pub position: u32,
}

impl Category {
    /// Create a new category.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, position: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position,
        }
    }
}
