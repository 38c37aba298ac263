//! In-memory entity store.
//!
//! Owns the document and the id generator. Every mutation either succeeds
//! completely or leaves the tree untouched; none of them perform I/O.

use tracker_core::{Editable, TrackerError, TrackerResult};

use crate::document::{Document, EntityKind, EntityPath, Found, Position};
use crate::editable::normalize_name;
use crate::id::{EntityId, IdGenerator};
use crate::{
    Commit, CommitUpdate, File, FileUpdate, Project, ProjectUpdate, Task, TaskUpdate,
};

#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    document: Document,
    ids: IdGenerator,
}

fn not_found(kind: EntityKind, id: EntityId) -> TrackerError {
    TrackerError::NotFound(format!("{} {}", kind, id))
}

impl EntityStore {
    pub fn new(document: Document) -> Self {
        let ids = IdGenerator::seeded(document.max_id());
        Self { document, ids }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Swap in a whole new tree (import). Ids keep increasing past both trees.
    pub fn replace_document(&mut self, document: Document) {
        if let Some(max) = document.max_id() {
            self.ids.observe(max);
        }
        self.document = document;
    }

    pub fn next_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    pub fn find_by_id(&self, id: EntityId) -> Option<Found<'_>> {
        self.document.find_by_id(id)
    }

    pub fn locate(&self, id: EntityId) -> Option<EntityPath> {
        self.document.locate(id)
    }

    pub fn projects(&self) -> &[Project] {
        &self.document.projects
    }

    pub fn entity_count(&self) -> usize {
        self.document.entity_count()
    }

    fn position_of(&self, id: EntityId, kind: EntityKind) -> TrackerResult<Position> {
        let position = self
            .document
            .position(id)
            .ok_or_else(|| not_found(kind, id))?;
        let found_kind = self
            .document
            .locate(id)
            .map(|path| path.kind())
            .ok_or_else(|| not_found(kind, id))?;
        if found_kind != kind {
            return Err(not_found(kind, id));
        }
        Ok(position)
    }

    pub fn create_project(&mut self, name: &str) -> TrackerResult<Project> {
        let name = normalize_name(name, EntityKind::Project)?;
        let project = Project::new(self.ids.next_id(), name);
        self.document.projects.push(project.clone());
        tracing::debug!("Created project {} ({})", project.name, project.id);
        Ok(project)
    }

    pub fn create_task(&mut self, project_id: EntityId, name: &str) -> TrackerResult<Task> {
        let name = normalize_name(name, EntityKind::Task)?;
        let position = self.position_of(project_id, EntityKind::Project)?;
        let task = Task::new(self.ids.next_id(), name);
        self.document
            .project_at_mut(position)
            .tasks
            .push(task.clone());
        tracing::debug!("Created task {} ({}) in project {}", task.name, task.id, project_id);
        Ok(task)
    }

    pub fn create_commit(&mut self, task_id: EntityId, name: &str) -> TrackerResult<Commit> {
        let name = normalize_name(name, EntityKind::Commit)?;
        let position = self.position_of(task_id, EntityKind::Task)?;
        let commit = Commit::new(self.ids.next_id(), name);
        self.document
            .task_at_mut(position)
            .ok_or_else(|| not_found(EntityKind::Task, task_id))?
            .commits
            .push(commit.clone());
        tracing::debug!("Created commit {} ({}) in task {}", commit.name, commit.id, task_id);
        Ok(commit)
    }

    pub fn create_file(
        &mut self,
        commit_id: EntityId,
        name: &str,
        description: &str,
    ) -> TrackerResult<File> {
        let name = normalize_name(name, EntityKind::File)?;
        let position = self.position_of(commit_id, EntityKind::Commit)?;
        let file = File::new(self.ids.next_id(), name, description.trim().to_string());
        self.document
            .commit_at_mut(position)
            .ok_or_else(|| not_found(EntityKind::Commit, commit_id))?
            .files
            .push(file.clone());
        tracing::debug!("Created file {} ({}) in commit {}", file.name, file.id, commit_id);
        Ok(file)
    }

    pub fn edit_project(&mut self, id: EntityId, update: ProjectUpdate) -> TrackerResult<Project> {
        let position = self.position_of(id, EntityKind::Project)?;
        let project = self.document.project_at_mut(position);
        update.apply_to(project)?;
        Ok(project.clone())
    }

    pub fn rename_project(&mut self, id: EntityId, name: &str) -> TrackerResult<Project> {
        self.edit_project(
            id,
            ProjectUpdate {
                name: Some(name.to_string()),
            },
        )
    }

    pub fn edit_task(&mut self, id: EntityId, update: TaskUpdate) -> TrackerResult<Task> {
        let position = self.position_of(id, EntityKind::Task)?;
        let task = self
            .document
            .task_at_mut(position)
            .ok_or_else(|| not_found(EntityKind::Task, id))?;
        update.apply_to(task)?;
        Ok(task.clone())
    }

    pub fn edit_commit(&mut self, id: EntityId, update: CommitUpdate) -> TrackerResult<Commit> {
        let position = self.position_of(id, EntityKind::Commit)?;
        let commit = self
            .document
            .commit_at_mut(position)
            .ok_or_else(|| not_found(EntityKind::Commit, id))?;
        update.apply_to(commit)?;
        Ok(commit.clone())
    }

    pub fn rename_commit(&mut self, id: EntityId, name: &str) -> TrackerResult<Commit> {
        self.edit_commit(
            id,
            CommitUpdate {
                name: Some(name.to_string()),
            },
        )
    }

    pub fn edit_file(&mut self, id: EntityId, update: FileUpdate) -> TrackerResult<File> {
        let position = self.position_of(id, EntityKind::File)?;
        let file = self
            .document
            .file_at_mut(position)
            .ok_or_else(|| not_found(EntityKind::File, id))?;
        update.apply_to(file)?;
        Ok(file.clone())
    }

    /// Flip the collapsed flag of a project or task and return the new value.
    pub fn toggle_collapse(&mut self, id: EntityId) -> TrackerResult<bool> {
        let path = self
            .document
            .locate(id)
            .ok_or_else(|| TrackerError::NotFound(format!("entity {}", id)))?;
        let position = self
            .document
            .position(id)
            .ok_or_else(|| TrackerError::NotFound(format!("entity {}", id)))?;
        match path.kind() {
            EntityKind::Project => Ok(self.document.project_at_mut(position).toggle_collapsed()),
            EntityKind::Task => self
                .document
                .task_at_mut(position)
                .map(|task| task.toggle_collapsed())
                .ok_or_else(|| not_found(EntityKind::Task, id)),
            kind => Err(TrackerError::Validation(format!(
                "a {} cannot be collapsed",
                kind
            ))),
        }
    }

    /// Remove an entity and, through ownership, its whole subtree.
    ///
    /// Every sibling carrying the same id goes with it.
    pub fn delete(&mut self, id: EntityId) -> TrackerResult<EntityPath> {
        let path = self
            .document
            .locate(id)
            .ok_or_else(|| TrackerError::NotFound(format!("entity {}", id)))?;
        let position = self
            .document
            .position(id)
            .ok_or_else(|| TrackerError::NotFound(format!("entity {}", id)))?;

        match path.kind() {
            EntityKind::Project => self.document.projects.retain(|p| p.id != id),
            EntityKind::Task => self
                .document
                .project_at_mut(position)
                .tasks
                .retain(|t| t.id != id),
            EntityKind::Commit => {
                if let Some(task) = self.document.task_at_mut(position) {
                    task.commits.retain(|c| c.id != id);
                }
            }
            EntityKind::File => {
                if let Some(commit) = self.document.commit_at_mut(position) {
                    commit.files.retain(|f| f.id != id);
                }
            }
        }

        tracing::debug!("Deleted {} {}", path.kind(), id);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldUpdate, TaskStatus};

    fn store_with_tree() -> (EntityStore, EntityId, EntityId, EntityId, EntityId) {
        let mut store = EntityStore::default();
        let project = store.create_project("Website").unwrap();
        let task = store.create_task(project.id, "Landing page").unwrap();
        let commit = store.create_commit(task.id, "Hero section").unwrap();
        let file = store.create_file(commit.id, "hero.css", "styles").unwrap();
        (store, project.id, task.id, commit.id, file.id)
    }

    #[test]
    fn test_create_project_then_find() {
        let mut store = EntityStore::default();
        let project = store.create_project("  Website ").unwrap();
        match store.find_by_id(project.id) {
            Some(Found::Project(found)) => {
                assert_eq!(found.name, "Website");
                assert!(found.tasks.is_empty());
            }
            other => panic!("expected project, got {:?}", other),
        }
    }

    #[test]
    fn test_create_project_rejects_blank_name() {
        let mut store = EntityStore::default();
        assert!(store.create_project("   ").unwrap_err().is_validation());
        assert!(store.projects().is_empty());
    }

    #[test]
    fn test_children_append_in_insertion_order() {
        let mut store = EntityStore::default();
        let project = store.create_project("Website").unwrap();
        let names = ["one", "two", "three"];
        for name in names {
            store.create_task(project.id, name).unwrap();
        }
        let tasks: Vec<_> = store.projects()[0]
            .tasks
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(tasks, names);
    }

    #[test]
    fn test_new_task_is_todo() {
        let (store, _, task_id, _, _) = store_with_tree();
        assert_eq!(store.document().task(task_id).unwrap().status, TaskStatus::ToDo);
    }

    #[test]
    fn test_create_under_wrong_kind_is_not_found() {
        let (mut store, _, task_id, _, file_id) = store_with_tree();
        let before = store.document().clone();
        assert!(store.create_task(task_id, "nested").unwrap_err().is_not_found());
        assert!(store.create_file(file_id, "x", "").unwrap_err().is_not_found());
        assert!(store.create_commit(12345, "x").unwrap_err().is_not_found());
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn test_ids_unique_across_kinds() {
        let (store, ..) = store_with_tree();
        let mut ids = store.document().all_ids();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_edit_task_with_whitespace_name_is_rejected() {
        let (mut store, _, task_id, _, _) = store_with_tree();
        let result = store.edit_task(
            task_id,
            TaskUpdate {
                name: Some("   ".to_string()),
                status: None,
            },
        );
        assert!(result.unwrap_err().is_validation());
        assert_eq!(store.document().task(task_id).unwrap().name, "Landing page");
    }

    #[test]
    fn test_edit_task_status() {
        let (mut store, _, task_id, _, _) = store_with_tree();
        let task = store
            .edit_task(
                task_id,
                TaskUpdate {
                    name: None,
                    status: Some(TaskStatus::Done),
                },
            )
            .unwrap();
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.name, "Landing page");
    }

    #[test]
    fn test_edit_file_and_rename_commit() {
        let (mut store, _, _, commit_id, file_id) = store_with_tree();
        store.rename_commit(commit_id, "Hero polish").unwrap();
        store
            .edit_file(
                file_id,
                FileUpdate {
                    name: Some("hero.scss".to_string()),
                    description: FieldUpdate::Clear,
                },
            )
            .unwrap();
        let doc = store.document();
        assert_eq!(doc.commit(commit_id).unwrap().name, "Hero polish");
        let file = doc.file(file_id).unwrap();
        assert_eq!(file.name, "hero.scss");
        assert_eq!(file.description, "");
    }

    #[test]
    fn test_rename_project_targets_only_projects() {
        let (mut store, project_id, task_id, _, _) = store_with_tree();
        store.rename_project(project_id, "Site").unwrap();
        assert_eq!(store.projects()[0].name, "Site");
        assert!(store.rename_project(task_id, "x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_project_cascades() {
        let (mut store, project_id, task_id, commit_id, file_id) = store_with_tree();
        let removed = store.delete(project_id).unwrap();
        assert_eq!(removed.kind(), EntityKind::Project);
        for id in [project_id, task_id, commit_id, file_id] {
            assert!(store.find_by_id(id).is_none());
        }
    }

    #[test]
    fn test_delete_commit_keeps_siblings_and_ancestors() {
        let (mut store, project_id, task_id, commit_id, file_id) = store_with_tree();
        let other = store.create_commit(task_id, "Footer").unwrap();
        store.delete(commit_id).unwrap();
        assert!(store.find_by_id(file_id).is_none());
        assert!(store.find_by_id(other.id).is_some());
        assert!(store.find_by_id(task_id).is_some());
        assert!(store.find_by_id(project_id).is_some());
    }

    #[test]
    fn test_delete_unknown_is_not_found() {
        let (mut store, ..) = store_with_tree();
        assert!(store.delete(42).unwrap_err().is_not_found());
    }

    #[test]
    fn test_toggle_collapse_flips_the_entity_itself() {
        let (mut store, project_id, task_id, commit_id, _) = store_with_tree();
        assert!(store.toggle_collapse(task_id).unwrap());
        assert!(store.document().task(task_id).unwrap().is_collapsed);
        assert!(!store.document().project(project_id).unwrap().is_collapsed);

        assert!(store.toggle_collapse(project_id).unwrap());
        assert!(!store.toggle_collapse(project_id).unwrap());
        assert!(store.toggle_collapse(commit_id).unwrap_err().is_validation());
    }

    #[test]
    fn test_replace_document_keeps_ids_increasing() {
        let mut store = EntityStore::default();
        let far_future = chrono::Utc::now().timestamp_millis() + 10_000_000;
        store.replace_document(Document::from_projects(vec![Project::new(
            far_future,
            "Imported".to_string(),
        )]));
        let project = store.create_project("Next").unwrap();
        assert!(project.id > far_future);
    }
}
