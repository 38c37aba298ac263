use serde::{Deserialize, Serialize};

use crate::id::EntityId;

/// A file touched by a commit. An empty description means "none".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl File {
    pub fn new(id: EntityId, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
        }
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    pub fn update_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn update_description(&mut self, description: String) {
        self.description = description;
    }
}
