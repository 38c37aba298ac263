use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::commit::Commit;
use crate::id::EntityId;

/// Workflow state of a task.
///
/// Persisted with the human labels found in existing documents; the
/// compact variant names are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do", alias = "ToDo")]
    ToDo,
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    // Case-insensitive, ignores separators so "in-progress", "In Progress"
    // and "IN_PROGRESS" all parse.
    pub fn parse_case_insensitive(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "todo" => Some(TaskStatus::ToDo),
            "inprogress" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_case_insensitive(s).ok_or_else(|| {
            format!("unknown task status '{}' (expected todo, in-progress or done)", s)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub is_collapsed: bool,
    #[serde(default)]
    pub commits: Vec<Commit>,
}

impl Task {
    pub fn new(id: EntityId, name: String) -> Self {
        Self {
            id,
            name,
            status: TaskStatus::ToDo,
            is_collapsed: false,
            commits: Vec::new(),
        }
    }

    pub fn update_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn update_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    pub fn toggle_collapsed(&mut self) -> bool {
        self.is_collapsed = !self.is_collapsed;
        self.is_collapsed
    }

    pub fn commit(&self, id: EntityId) -> Option<&Commit> {
        self.commits.iter().find(|c| c.id == id)
    }
}
