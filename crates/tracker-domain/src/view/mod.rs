//! Presentation layer.
//!
//! One core, two ways to look at it. The host picks a [`ViewMode`] and gets a
//! [`ViewStrategy`] that turns the current document and navigation state into
//! a [`View`] it can draw.

use serde::Serialize;
use tracker_core::ViewMode;

use crate::document::{Document, EntityKind};
use crate::id::EntityId;
use crate::navigation::NavigationState;
use crate::{Commit, File, Project, Task, TaskStatus};

pub mod drill_down;
pub mod tree;

pub use drill_down::DrillDownViewStrategy;
pub use tree::TreeViewStrategy;

/// Shown when the document holds no projects.
pub const EMPTY_STATE_MESSAGE: &str = "No Projects Found";

pub trait ViewStrategy {
    fn mode(&self) -> ViewMode;
    fn render(&self, document: &Document, navigation: &NavigationState) -> View;
}

pub fn strategy_for(mode: ViewMode) -> Box<dyn ViewStrategy> {
    match mode {
        ViewMode::Tree => Box::new(TreeViewStrategy),
        ViewMode::DrillDown => Box::new(DrillDownViewStrategy),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum View {
    Empty {
        message: String,
    },
    Tree {
        rows: Vec<Row>,
    },
    DrillDown {
        breadcrumbs: Vec<Crumb>,
        /// Kind of the listed items.
        listing: EntityKind,
        items: Vec<Row>,
    },
}

impl View {
    pub fn empty() -> Self {
        View::Empty {
            message: EMPTY_STATE_MESSAGE.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, View::Empty { .. })
    }

    pub fn rows(&self) -> &[Row] {
        match self {
            View::Empty { .. } => &[],
            View::Tree { rows } => rows,
            View::DrillDown { items, .. } => items,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub depth: usize,
    pub kind: EntityKind,
    pub id: EntityId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_collapsed: Option<bool>,
    pub child_count: usize,
}

impl Row {
    pub fn project(project: &Project) -> Self {
        Self {
            depth: 0,
            kind: EntityKind::Project,
            id: project.id,
            label: project.name.clone(),
            status: None,
            description: None,
            is_collapsed: Some(project.is_collapsed),
            child_count: project.tasks.len(),
        }
    }

    pub fn task(task: &Task) -> Self {
        Self {
            depth: 1,
            kind: EntityKind::Task,
            id: task.id,
            label: task.name.clone(),
            status: Some(task.status),
            description: None,
            is_collapsed: Some(task.is_collapsed),
            child_count: task.commits.len(),
        }
    }

    pub fn commit(commit: &Commit) -> Self {
        Self {
            depth: 2,
            kind: EntityKind::Commit,
            id: commit.id,
            label: commit.name.clone(),
            status: None,
            description: None,
            is_collapsed: None,
            child_count: commit.files.len(),
        }
    }

    pub fn file(file: &File) -> Self {
        Self {
            depth: 3,
            kind: EntityKind::File,
            id: file.id,
            label: file.name.clone(),
            status: None,
            description: file
                .has_description()
                .then(|| file.description.clone()),
            is_collapsed: None,
            child_count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub kind: EntityKind,
    pub id: EntityId,
    pub label: String,
}
