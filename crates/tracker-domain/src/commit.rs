use serde::{Deserialize, Serialize};

use crate::file::File;
use crate::id::EntityId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub files: Vec<File>,
}

impl Commit {
    pub fn new(id: EntityId, name: String) -> Self {
        Self {
            id,
            name,
            files: Vec::new(),
        }
    }

    pub fn update_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn file(&self, id: EntityId) -> Option<&File> {
        self.files.iter().find(|f| f.id == id)
    }
}
