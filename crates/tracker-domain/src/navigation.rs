//! Drill-down navigation state.
//!
//! Four slots, project → task → commit → file, each empty or holding an id.
//! Slots always form a prefix: a deeper slot is only occupied when every
//! shallower one is, and each selected id is a child of the slot above it.

use serde::{Deserialize, Serialize};
use tracker_core::{TrackerError, TrackerResult};

use crate::document::{Document, EntityKind, EntityPath};
use crate::id::EntityId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    selected_project: Option<EntityId>,
    selected_task: Option<EntityId>,
    selected_commit: Option<EntityId>,
    selected_file: Option<EntityId>,
}

fn expect_kind(document: &Document, id: EntityId, kind: EntityKind) -> TrackerResult<EntityPath> {
    let path = document
        .locate(id)
        .ok_or_else(|| TrackerError::NotFound(format!("{} {}", kind, id)))?;
    if path.kind() != kind {
        return Err(TrackerError::NotFound(format!("{} {}", kind, id)));
    }
    Ok(path)
}

fn check_parent(expected: Option<EntityId>, actual: Option<EntityId>, what: &str) -> TrackerResult<()> {
    if expected.is_none() || expected != actual {
        return Err(TrackerError::Validation(format!(
            "{} does not belong to the current selection",
            what
        )));
    }
    Ok(())
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_project(&self) -> Option<EntityId> {
        self.selected_project
    }

    pub fn selected_task(&self) -> Option<EntityId> {
        self.selected_task
    }

    pub fn selected_commit(&self) -> Option<EntityId> {
        self.selected_commit
    }

    pub fn selected_file(&self) -> Option<EntityId> {
        self.selected_file
    }

    pub fn is_empty(&self) -> bool {
        self.selected_project.is_none()
    }

    /// Selected ids, root first.
    pub fn trail(&self) -> Vec<EntityId> {
        [
            self.selected_project,
            self.selected_task,
            self.selected_commit,
            self.selected_file,
        ]
        .into_iter()
        .map_while(|slot| slot)
        .collect()
    }

    /// Kind of the deepest occupied slot.
    pub fn depth(&self) -> Option<EntityKind> {
        if self.selected_file.is_some() {
            Some(EntityKind::File)
        } else if self.selected_commit.is_some() {
            Some(EntityKind::Commit)
        } else if self.selected_task.is_some() {
            Some(EntityKind::Task)
        } else if self.selected_project.is_some() {
            Some(EntityKind::Project)
        } else {
            None
        }
    }

    pub fn select_project(&mut self, document: &Document, id: EntityId) -> TrackerResult<()> {
        expect_kind(document, id, EntityKind::Project)?;
        self.selected_project = Some(id);
        self.selected_task = None;
        self.selected_commit = None;
        self.selected_file = None;
        Ok(())
    }

    pub fn select_task(&mut self, document: &Document, id: EntityId) -> TrackerResult<()> {
        let path = expect_kind(document, id, EntityKind::Task)?;
        check_parent(self.selected_project, Some(path.project), "task")?;
        self.selected_task = Some(id);
        self.selected_commit = None;
        self.selected_file = None;
        Ok(())
    }

    pub fn select_commit(&mut self, document: &Document, id: EntityId) -> TrackerResult<()> {
        let path = expect_kind(document, id, EntityKind::Commit)?;
        check_parent(self.selected_task, path.task, "commit")?;
        self.selected_commit = Some(id);
        self.selected_file = None;
        Ok(())
    }

    pub fn select_file(&mut self, document: &Document, id: EntityId) -> TrackerResult<()> {
        let path = expect_kind(document, id, EntityKind::File)?;
        check_parent(self.selected_commit, path.commit, "file")?;
        self.selected_file = Some(id);
        Ok(())
    }

    /// Jump straight to any entity, rebuilding every slot from its ancestors.
    pub fn focus(&mut self, document: &Document, id: EntityId) -> TrackerResult<()> {
        let path = document
            .locate(id)
            .ok_or_else(|| TrackerError::NotFound(format!("entity {}", id)))?;
        self.selected_project = Some(path.project);
        self.selected_task = path.task;
        self.selected_commit = path.commit;
        self.selected_file = path.file;
        Ok(())
    }

    /// Step one level up. Returns false when already at the root.
    pub fn back(&mut self) -> bool {
        if self.selected_file.take().is_some() {
            return true;
        }
        if self.selected_commit.take().is_some() {
            return true;
        }
        if self.selected_task.take().is_some() {
            return true;
        }
        self.selected_project.take().is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Drop any selection that pointed into a removed subtree.
    pub fn clear_removed(&mut self, removed: &EntityPath) {
        let id = removed.id();
        match removed.kind() {
            EntityKind::Project if self.selected_project == Some(id) => self.clear(),
            EntityKind::Task if self.selected_task == Some(id) => {
                self.selected_task = None;
                self.selected_commit = None;
                self.selected_file = None;
            }
            EntityKind::Commit if self.selected_commit == Some(id) => {
                self.selected_commit = None;
                self.selected_file = None;
            }
            EntityKind::File if self.selected_file == Some(id) => {
                self.selected_file = None;
            }
            _ => {}
        }
    }

    /// Re-validate every slot against a (possibly replaced) document and
    /// truncate at the first one that no longer resolves.
    pub fn reconcile(&mut self, document: &Document) {
        let valid_project = self
            .selected_project
            .is_some_and(|id| expect_kind(document, id, EntityKind::Project).is_ok());
        if !valid_project {
            self.clear();
            return;
        }

        let valid_task = self.selected_task.is_some_and(|id| {
            expect_kind(document, id, EntityKind::Task)
                .is_ok_and(|path| Some(path.project) == self.selected_project)
        });
        if !valid_task {
            self.selected_task = None;
            self.selected_commit = None;
            self.selected_file = None;
            return;
        }

        let valid_commit = self.selected_commit.is_some_and(|id| {
            expect_kind(document, id, EntityKind::Commit)
                .is_ok_and(|path| path.task == self.selected_task)
        });
        if !valid_commit {
            self.selected_commit = None;
            self.selected_file = None;
            return;
        }

        let valid_file = self.selected_file.is_some_and(|id| {
            expect_kind(document, id, EntityKind::File)
                .is_ok_and(|path| path.commit == self.selected_commit)
        });
        if !valid_file {
            self.selected_file = None;
        }
    }
}
