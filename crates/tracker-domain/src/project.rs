use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub is_collapsed: bool,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(id: EntityId, name: String) -> Self {
        Self {
            id,
            name,
            is_collapsed: false,
            tasks: Vec::new(),
        }
    }

    pub fn update_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn toggle_collapsed(&mut self) -> bool {
        self.is_collapsed = !self.is_collapsed;
        self.is_collapsed
    }

    pub fn task(&self, id: EntityId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}
