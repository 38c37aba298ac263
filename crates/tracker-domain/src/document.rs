//! The persisted project tree.
//!
//! A `Document` is the whole Project → Task → Commit → File hierarchy. It
//! serializes as a bare JSON array of projects. Children are owned by their
//! parent, so removing a node drops its entire subtree.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::commit::Commit;
use crate::file::File;
use crate::id::{EntityId, IdGenerator};
use crate::project::Project;
use crate::task::Task;

pub const SEED_PROJECT_NAME: &str = "My First Project";
pub const SEED_TASK_NAME: &str = "Getting started";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Project,
    Task,
    Commit,
    File,
}

impl EntityKind {
    /// Nesting depth, projects at 0.
    pub fn depth(&self) -> usize {
        match self {
            EntityKind::Project => 0,
            EntityKind::Task => 1,
            EntityKind::Commit => 2,
            EntityKind::File => 3,
        }
    }

    pub fn child(&self) -> Option<EntityKind> {
        match self {
            EntityKind::Project => Some(EntityKind::Task),
            EntityKind::Task => Some(EntityKind::Commit),
            EntityKind::Commit => Some(EntityKind::File),
            EntityKind::File => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Task => "task",
            EntityKind::Commit => "commit",
            EntityKind::File => "file",
        }
    }

    /// Capitalized form for headings.
    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Project => "Project",
            EntityKind::Task => "Task",
            EntityKind::Commit => "Commit",
            EntityKind::File => "File",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The ancestor chain of an entity, root first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityPath {
    pub project: EntityId,
    pub task: Option<EntityId>,
    pub commit: Option<EntityId>,
    pub file: Option<EntityId>,
}

impl EntityPath {
    pub fn kind(&self) -> EntityKind {
        if self.file.is_some() {
            EntityKind::File
        } else if self.commit.is_some() {
            EntityKind::Commit
        } else if self.task.is_some() {
            EntityKind::Task
        } else {
            EntityKind::Project
        }
    }

    /// Id of the entity the path ends at.
    pub fn id(&self) -> EntityId {
        self.file
            .or(self.commit)
            .or(self.task)
            .unwrap_or(self.project)
    }

    pub fn parent_id(&self) -> Option<EntityId> {
        match self.kind() {
            EntityKind::Project => None,
            EntityKind::Task => Some(self.project),
            EntityKind::Commit => self.task,
            EntityKind::File => self.commit,
        }
    }

    pub fn ids(&self) -> Vec<EntityId> {
        std::iter::once(self.project)
            .chain(self.task)
            .chain(self.commit)
            .chain(self.file)
            .collect()
    }
}

/// Result of an id lookup: the entity plus every ancestor met on the way.
#[derive(Debug, Clone, Copy)]
pub enum Found<'a> {
    Project(&'a Project),
    Task {
        project: &'a Project,
        task: &'a Task,
    },
    Commit {
        project: &'a Project,
        task: &'a Task,
        commit: &'a Commit,
    },
    File {
        project: &'a Project,
        task: &'a Task,
        commit: &'a Commit,
        file: &'a File,
    },
}

impl<'a> Found<'a> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Found::Project(_) => EntityKind::Project,
            Found::Task { .. } => EntityKind::Task,
            Found::Commit { .. } => EntityKind::Commit,
            Found::File { .. } => EntityKind::File,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            Found::Project(project) => project.id,
            Found::Task { task, .. } => task.id,
            Found::Commit { commit, .. } => commit.id,
            Found::File { file, .. } => file.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match *self {
            Found::Project(project) => &project.name,
            Found::Task { task, .. } => &task.name,
            Found::Commit { commit, .. } => &commit.name,
            Found::File { file, .. } => &file.name,
        }
    }

    pub fn project(&self) -> &'a Project {
        match *self {
            Found::Project(project)
            | Found::Task { project, .. }
            | Found::Commit { project, .. }
            | Found::File { project, .. } => project,
        }
    }

    pub fn path(&self) -> EntityPath {
        match self {
            Found::Project(project) => EntityPath {
                project: project.id,
                task: None,
                commit: None,
                file: None,
            },
            Found::Task { project, task } => EntityPath {
                project: project.id,
                task: Some(task.id),
                commit: None,
                file: None,
            },
            Found::Commit {
                project,
                task,
                commit,
            } => EntityPath {
                project: project.id,
                task: Some(task.id),
                commit: Some(commit.id),
                file: None,
            },
            Found::File {
                project,
                task,
                commit,
                file,
            } => EntityPath {
                project: project.id,
                task: Some(task.id),
                commit: Some(commit.id),
                file: Some(file.id),
            },
        }
    }
}

/// Index chain of a located entity, used for exact mutable access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position {
    pub project: usize,
    pub task: Option<usize>,
    pub commit: Option<usize>,
    pub file: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub projects: Vec<Project>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_projects(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// The document handed out when nothing usable is on disk: one project
    /// holding one to-do task.
    pub fn seeded(ids: &mut IdGenerator) -> Self {
        let mut project = Project::new(ids.next_id(), SEED_PROJECT_NAME.to_string());
        project
            .tasks
            .push(Task::new(ids.next_id(), SEED_TASK_NAME.to_string()));
        Self {
            projects: vec![project],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Depth-first lookup in document order. When ids collide the first
    /// match wins.
    pub fn find_by_id(&self, id: EntityId) -> Option<Found<'_>> {
        let position = self.position(id)?;
        let project = &self.projects[position.project];
        let Some(task_index) = position.task else {
            return Some(Found::Project(project));
        };
        let task = &project.tasks[task_index];
        let Some(commit_index) = position.commit else {
            return Some(Found::Task { project, task });
        };
        let commit = &task.commits[commit_index];
        let Some(file_index) = position.file else {
            return Some(Found::Commit {
                project,
                task,
                commit,
            });
        };
        Some(Found::File {
            project,
            task,
            commit,
            file: &commit.files[file_index],
        })
    }

    pub fn locate(&self, id: EntityId) -> Option<EntityPath> {
        self.find_by_id(id).map(|found| found.path())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.position(id).is_some()
    }

    pub fn project(&self, id: EntityId) -> Option<&Project> {
        match self.find_by_id(id)? {
            Found::Project(project) => Some(project),
            _ => None,
        }
    }

    pub fn task(&self, id: EntityId) -> Option<&Task> {
        match self.find_by_id(id)? {
            Found::Task { task, .. } => Some(task),
            _ => None,
        }
    }

    pub fn commit(&self, id: EntityId) -> Option<&Commit> {
        match self.find_by_id(id)? {
            Found::Commit { commit, .. } => Some(commit),
            _ => None,
        }
    }

    pub fn file(&self, id: EntityId) -> Option<&File> {
        match self.find_by_id(id)? {
            Found::File { file, .. } => Some(file),
            _ => None,
        }
    }

    pub(crate) fn position(&self, id: EntityId) -> Option<Position> {
        for (p, project) in self.projects.iter().enumerate() {
            if project.id == id {
                return Some(Position {
                    project: p,
                    task: None,
                    commit: None,
                    file: None,
                });
            }
            for (t, task) in project.tasks.iter().enumerate() {
                if task.id == id {
                    return Some(Position {
                        project: p,
                        task: Some(t),
                        commit: None,
                        file: None,
                    });
                }
                for (c, commit) in task.commits.iter().enumerate() {
                    if commit.id == id {
                        return Some(Position {
                            project: p,
                            task: Some(t),
                            commit: Some(c),
                            file: None,
                        });
                    }
                    for (f, file) in commit.files.iter().enumerate() {
                        if file.id == id {
                            return Some(Position {
                                project: p,
                                task: Some(t),
                                commit: Some(c),
                                file: Some(f),
                            });
                        }
                    }
                }
            }
        }
        None
    }

    pub(crate) fn project_at_mut(&mut self, position: Position) -> &mut Project {
        &mut self.projects[position.project]
    }

    pub(crate) fn task_at_mut(&mut self, position: Position) -> Option<&mut Task> {
        let task = position.task?;
        Some(&mut self.projects[position.project].tasks[task])
    }

    pub(crate) fn commit_at_mut(&mut self, position: Position) -> Option<&mut Commit> {
        let commit = position.commit?;
        let task = self.task_at_mut(position)?;
        Some(&mut task.commits[commit])
    }

    pub(crate) fn file_at_mut(&mut self, position: Position) -> Option<&mut File> {
        let file = position.file?;
        let commit = self.commit_at_mut(position)?;
        Some(&mut commit.files[file])
    }

    /// Every id in document order.
    pub fn all_ids(&self) -> Vec<EntityId> {
        let mut ids = Vec::new();
        for project in &self.projects {
            ids.push(project.id);
            for task in &project.tasks {
                ids.push(task.id);
                for commit in &task.commits {
                    ids.push(commit.id);
                    ids.extend(commit.files.iter().map(|f| f.id));
                }
            }
        }
        ids
    }

    pub fn max_id(&self) -> Option<EntityId> {
        self.all_ids().into_iter().max()
    }

    pub fn entity_count(&self) -> usize {
        self.all_ids().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    fn sample() -> Document {
        let mut file = File::new(4, "main.rs".to_string(), String::new());
        file.description = "entry point".to_string();
        let mut commit = Commit::new(3, "Initial".to_string());
        commit.files.push(file);
        let mut task = Task::new(2, "Bootstrap".to_string());
        task.commits.push(commit);
        let mut project = Project::new(1, "Website".to_string());
        project.tasks.push(task);
        Document::from_projects(vec![project, Project::new(5, "Docs".to_string())])
    }

    #[test]
    fn test_find_by_id_returns_ancestor_chain() {
        let doc = sample();
        match doc.find_by_id(4) {
            Some(Found::File {
                project,
                task,
                commit,
                file,
            }) => {
                assert_eq!(project.id, 1);
                assert_eq!(task.id, 2);
                assert_eq!(commit.id, 3);
                assert_eq!(file.name, "main.rs");
            }
            other => panic!("expected file, got {:?}", other),
        }
    }

    #[test]
    fn test_find_by_id_misses_explicitly() {
        assert!(sample().find_by_id(99).is_none());
    }

    #[test]
    fn test_first_match_shadows_colliding_id() {
        let mut doc = sample();
        doc.projects[1].tasks.push(Task::new(2, "Shadowed".to_string()));
        let found = doc.find_by_id(2).unwrap();
        assert_eq!(found.name(), "Bootstrap");
    }

    #[test]
    fn test_locate_builds_path() {
        let path = sample().locate(3).unwrap();
        assert_eq!(path.kind(), EntityKind::Commit);
        assert_eq!(path.id(), 3);
        assert_eq!(path.parent_id(), Some(2));
        assert_eq!(path.ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_typed_accessors_check_kind() {
        let doc = sample();
        assert!(doc.project(1).is_some());
        assert!(doc.project(2).is_none());
        assert!(doc.task(2).is_some());
        assert!(doc.commit(3).is_some());
        assert!(doc.file(4).is_some());
        assert!(doc.file(1).is_none());
    }

    #[test]
    fn test_all_ids_in_document_order() {
        assert_eq!(sample().all_ids(), vec![1, 2, 3, 4, 5]);
        assert_eq!(sample().max_id(), Some(5));
        assert_eq!(Document::new().max_id(), None);
    }

    #[test]
    fn test_seeded_document_has_one_project_with_one_todo_task() {
        let mut ids = IdGenerator::new();
        let doc = Document::seeded(&mut ids);
        assert_eq!(doc.projects.len(), 1);
        assert_eq!(doc.projects[0].tasks.len(), 1);
        assert_eq!(doc.projects[0].tasks[0].status, TaskStatus::ToDo);
        assert_ne!(doc.projects[0].id, doc.projects[0].tasks[0].id);
    }

    #[test]
    fn test_serializes_as_bare_array() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["tasks"][0]["commits"][0]["files"][0]["description"], "entry point");
    }

    #[test]
    fn test_reads_documents_without_collapse_flags() {
        let json = r#"[
            {"id": 1, "name": "A", "tasks": [
                {"id": 2, "name": "B", "status": "Done", "commits": [
                    {"id": 3, "name": "C", "files": [{"id": 4, "name": "x.rs", "description": ""}]}
                ]}
            ]}
        ]"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert!(!doc.projects[0].is_collapsed);
        assert!(!doc.projects[0].tasks[0].is_collapsed);
        assert_eq!(doc.projects[0].tasks[0].status, TaskStatus::Done);
        assert_eq!(doc.entity_count(), 4);
    }
}
