//! Command dispatcher.
//!
//! Turns a named UI action plus a target id into a store or navigation
//! mutation. Creating, editing and deleting go through a two-step
//! protocol: [`Dispatcher::begin`] hands back a [`PendingAction`] carrying a
//! prefilled form or a yes/no question, and nothing changes until
//! [`Dispatcher::confirm`] succeeds. Toggling and navigation apply at once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracker_core::{Editable, TrackerError, TrackerResult};

use crate::commands::{
    Command, CreateCommit, CreateFile, CreateProject, CreateTask, DeleteEntity, NavigateBack,
    SelectEntity, ToggleCollapse, UpdateCommit, UpdateFile, UpdateProject, UpdateTask,
};
use crate::document::EntityKind;
use crate::id::EntityId;
use crate::workspace::Workspace;
use crate::{CommitUpdate, FieldUpdate, FileUpdate, ProjectUpdate, TaskUpdate};

/// Prefilled name of a new commit.
pub const DEFAULT_COMMIT_NAME: &str = "Commit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionName {
    AddProject,
    AddTask,
    AddCommit,
    AddFile,
    EditProject,
    EditTask,
    EditCommit,
    EditFile,
    DeleteProject,
    DeleteTask,
    DeleteCommit,
    DeleteFile,
    ToggleCollapse,
    SelectProject,
    SelectTask,
    SelectCommit,
    SelectFile,
    NavigateBack,
}

impl ActionName {
    pub const ALL: [ActionName; 18] = [
        ActionName::AddProject,
        ActionName::AddTask,
        ActionName::AddCommit,
        ActionName::AddFile,
        ActionName::EditProject,
        ActionName::EditTask,
        ActionName::EditCommit,
        ActionName::EditFile,
        ActionName::DeleteProject,
        ActionName::DeleteTask,
        ActionName::DeleteCommit,
        ActionName::DeleteFile,
        ActionName::ToggleCollapse,
        ActionName::SelectProject,
        ActionName::SelectTask,
        ActionName::SelectCommit,
        ActionName::SelectFile,
        ActionName::NavigateBack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionName::AddProject => "add-project",
            ActionName::AddTask => "add-task",
            ActionName::AddCommit => "add-commit",
            ActionName::AddFile => "add-file",
            ActionName::EditProject => "edit-project",
            ActionName::EditTask => "edit-task",
            ActionName::EditCommit => "edit-commit",
            ActionName::EditFile => "edit-file",
            ActionName::DeleteProject => "delete-project",
            ActionName::DeleteTask => "delete-task",
            ActionName::DeleteCommit => "delete-commit",
            ActionName::DeleteFile => "delete-file",
            ActionName::ToggleCollapse => "toggle-collapse",
            ActionName::SelectProject => "select-project",
            ActionName::SelectTask => "select-task",
            ActionName::SelectCommit => "select-commit",
            ActionName::SelectFile => "select-file",
            ActionName::NavigateBack => "navigate-back",
        }
    }

    /// Whether the action waits for an explicit confirmation.
    pub fn needs_confirmation(&self) -> bool {
        !matches!(
            self,
            ActionName::ToggleCollapse
                | ActionName::SelectProject
                | ActionName::SelectTask
                | ActionName::SelectCommit
                | ActionName::SelectFile
                | ActionName::NavigateBack
        )
    }

    /// Kind the target id must resolve to. For add actions this is the parent.
    fn target_kind(&self) -> Option<EntityKind> {
        match self {
            ActionName::AddProject | ActionName::NavigateBack | ActionName::ToggleCollapse => None,
            ActionName::AddTask
            | ActionName::EditProject
            | ActionName::DeleteProject
            | ActionName::SelectProject => Some(EntityKind::Project),
            ActionName::AddCommit
            | ActionName::EditTask
            | ActionName::DeleteTask
            | ActionName::SelectTask => Some(EntityKind::Task),
            ActionName::AddFile
            | ActionName::EditCommit
            | ActionName::DeleteCommit
            | ActionName::SelectCommit => Some(EntityKind::Commit),
            ActionName::EditFile | ActionName::DeleteFile | ActionName::SelectFile => {
                Some(EntityKind::File)
            }
        }
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionName {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionName::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| TrackerError::Validation(format!("unknown action '{}'", s)))
    }
}

/// One UI event: an action name and the id of the element it came from.
///
/// For `add-*` actions the target is the parent the new entity goes under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: ActionName,
    pub target: Option<EntityId>,
}

impl ActionRequest {
    pub fn new(action: ActionName, target: Option<EntityId>) -> Self {
        Self { action, target }
    }

    pub fn on(action: ActionName, target: EntityId) -> Self {
        Self::new(action, Some(target))
    }

    pub fn bare(action: ActionName) -> Self {
        Self::new(action, None)
    }
}

/// Editable fields shown to the user before a create or edit is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form {
    Project(ProjectUpdate),
    Task(TaskUpdate),
    Commit(CommitUpdate),
    File(FileUpdate),
}

impl Form {
    /// Set the name field regardless of form kind.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = Some(name.into());
        match self {
            Form::Project(form) => form.name = name,
            Form::Task(form) => form.name = name,
            Form::Commit(form) => form.name = name,
            Form::File(form) => form.name = name,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Form::Project(form) => form.name.as_deref(),
            Form::Task(form) => form.name.as_deref(),
            Form::Commit(form) => form.name.as_deref(),
            Form::File(form) => form.name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Form { title: String, form: Form },
    Confirm { title: String, message: String },
}

impl Prompt {
    pub fn title(&self) -> &str {
        match self {
            Prompt::Form { title, .. } | Prompt::Confirm { title, .. } => title,
        }
    }
}

/// An action waiting for the user's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    request: ActionRequest,
    prompt: Prompt,
}

impl PendingAction {
    pub fn request(&self) -> ActionRequest {
        self.request
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn title(&self) -> &str {
        self.prompt.title()
    }

    pub fn form(&self) -> Option<&Form> {
        match &self.prompt {
            Prompt::Form { form, .. } => Some(form),
            Prompt::Confirm { .. } => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match &mut self.prompt {
            Prompt::Form { form, .. } => Some(form),
            Prompt::Confirm { .. } => None,
        }
    }
}

/// What the host should do after an applied action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Effect {
    pub persist: bool,
    pub render: bool,
    pub touched: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Prompt(PendingAction),
    Applied(Effect),
    Ignored { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Applied(Effect),
    /// Validation failed; the prompt stays open and nothing changed.
    StillOpen { pending: PendingAction, reason: String },
    /// The target vanished while the prompt was open.
    Dismissed { reason: String },
}

pub struct Dispatcher;

impl Dispatcher {
    pub fn begin(workspace: &mut Workspace, request: ActionRequest) -> Outcome {
        match Self::prepare(workspace, request) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!("Ignoring {}: {}", request.action, err);
                Outcome::Ignored {
                    reason: err.to_string(),
                }
            }
        }
    }

    pub fn confirm(workspace: &mut Workspace, pending: PendingAction) -> ConfirmOutcome {
        let command = match Self::command_for(&pending) {
            Ok(command) => command,
            Err(err) => {
                return ConfirmOutcome::Dismissed {
                    reason: err.to_string(),
                }
            }
        };
        match workspace.execute(command.as_ref()) {
            Ok(outcome) => ConfirmOutcome::Applied(Effect {
                persist: outcome.persist,
                render: true,
                touched: outcome.touched,
            }),
            Err(err) if err.is_validation() => {
                tracing::debug!("{} kept open: {}", pending.request.action, err);
                ConfirmOutcome::StillOpen {
                    pending,
                    reason: err.to_string(),
                }
            }
            Err(err) => {
                tracing::warn!("Dismissing {}: {}", pending.request.action, err);
                ConfirmOutcome::Dismissed {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Close a prompt without applying it. Never mutates.
    pub fn cancel(pending: PendingAction) {
        tracing::debug!("Cancelled {}", pending.request.action);
    }

    fn prepare(workspace: &mut Workspace, request: ActionRequest) -> TrackerResult<Outcome> {
        let action = request.action;
        if let Some(kind) = action.target_kind() {
            let id = request
                .target
                .ok_or_else(|| TrackerError::Validation(format!("{} needs a target id", action)))?;
            let found = workspace
                .store
                .find_by_id(id)
                .ok_or_else(|| TrackerError::NotFound(format!("{} {}", kind, id)))?;
            if found.kind() != kind {
                return Err(TrackerError::NotFound(format!("{} {}", kind, id)));
            }
        }

        if !action.needs_confirmation() {
            let command = Self::immediate_command(request)?;
            let outcome = workspace.execute(command.as_ref())?;
            return Ok(Outcome::Applied(Effect {
                persist: outcome.persist,
                render: true,
                touched: outcome.touched,
            }));
        }

        let prompt = Self::prompt_for(workspace, request)?;
        Ok(Outcome::Prompt(PendingAction { request, prompt }))
    }

    fn immediate_command(request: ActionRequest) -> TrackerResult<Box<dyn Command>> {
        let target = || {
            request.target.ok_or_else(|| {
                TrackerError::Validation(format!("{} needs a target id", request.action))
            })
        };
        let command: Box<dyn Command> = match request.action {
            ActionName::ToggleCollapse => Box::new(ToggleCollapse { id: target()? }),
            ActionName::SelectProject => Box::new(SelectEntity {
                kind: EntityKind::Project,
                id: target()?,
            }),
            ActionName::SelectTask => Box::new(SelectEntity {
                kind: EntityKind::Task,
                id: target()?,
            }),
            ActionName::SelectCommit => Box::new(SelectEntity {
                kind: EntityKind::Commit,
                id: target()?,
            }),
            ActionName::SelectFile => Box::new(SelectEntity {
                kind: EntityKind::File,
                id: target()?,
            }),
            ActionName::NavigateBack => Box::new(NavigateBack),
            other => {
                return Err(TrackerError::Internal(format!(
                    "{} is not an immediate action",
                    other
                )))
            }
        };
        Ok(command)
    }

    fn prompt_for(workspace: &Workspace, request: ActionRequest) -> TrackerResult<Prompt> {
        let document = workspace.document();
        let target = request.target.unwrap_or_default();
        let missing = || TrackerError::NotFound(format!("entity {}", target));

        let prompt = match request.action {
            ActionName::AddProject => Prompt::Form {
                title: "Add New Project".to_string(),
                form: Form::Project(ProjectUpdate::default()),
            },
            ActionName::AddTask => Prompt::Form {
                title: "Add New Task".to_string(),
                form: Form::Task(TaskUpdate::default()),
            },
            ActionName::AddCommit => Prompt::Form {
                title: "Add New Commit".to_string(),
                form: Form::Commit(CommitUpdate {
                    name: Some(DEFAULT_COMMIT_NAME.to_string()),
                }),
            },
            ActionName::AddFile => Prompt::Form {
                title: "Add New File".to_string(),
                form: Form::File(FileUpdate::default()),
            },
            ActionName::EditProject => Prompt::Form {
                title: "Edit Project".to_string(),
                form: Form::Project(ProjectUpdate::from_entity(
                    document.project(target).ok_or_else(missing)?,
                )),
            },
            ActionName::EditTask => Prompt::Form {
                title: "Edit Task".to_string(),
                form: Form::Task(TaskUpdate::from_entity(
                    document.task(target).ok_or_else(missing)?,
                )),
            },
            ActionName::EditCommit => Prompt::Form {
                title: "Edit Commit".to_string(),
                form: Form::Commit(CommitUpdate::from_entity(
                    document.commit(target).ok_or_else(missing)?,
                )),
            },
            ActionName::EditFile => Prompt::Form {
                title: "Edit File".to_string(),
                form: Form::File(FileUpdate::from_entity(
                    document.file(target).ok_or_else(missing)?,
                )),
            },
            ActionName::DeleteProject
            | ActionName::DeleteTask
            | ActionName::DeleteCommit
            | ActionName::DeleteFile => {
                let found = document.find_by_id(target).ok_or_else(missing)?;
                Prompt::Confirm {
                    title: format!("Delete {}", found.kind().title()),
                    message: format!(
                        "Are you sure you want to delete the {} \"{}\"? This action cannot be undone.",
                        found.kind(),
                        found.name()
                    ),
                }
            }
            other => {
                return Err(TrackerError::Internal(format!(
                    "{} does not open a prompt",
                    other
                )))
            }
        };
        Ok(prompt)
    }

    fn command_for(pending: &PendingAction) -> TrackerResult<Box<dyn Command>> {
        let request = pending.request;
        let target = || {
            request.target.ok_or_else(|| {
                TrackerError::Validation(format!("{} needs a target id", request.action))
            })
        };
        let mismatch = || {
            TrackerError::Internal(format!(
                "form does not match action {}",
                request.action
            ))
        };

        let command: Box<dyn Command> = match (request.action, &pending.prompt) {
            (ActionName::AddProject, Prompt::Form { form: Form::Project(form), .. }) => {
                Box::new(CreateProject {
                    name: form.name.clone().unwrap_or_default(),
                })
            }
            (ActionName::AddTask, Prompt::Form { form: Form::Task(form), .. }) => {
                Box::new(CreateTask {
                    project_id: target()?,
                    name: form.name.clone().unwrap_or_default(),
                })
            }
            (ActionName::AddCommit, Prompt::Form { form: Form::Commit(form), .. }) => {
                Box::new(CreateCommit {
                    task_id: target()?,
                    name: form.name.clone().unwrap_or_default(),
                })
            }
            (ActionName::AddFile, Prompt::Form { form: Form::File(form), .. }) => {
                Box::new(CreateFile {
                    commit_id: target()?,
                    name: form.name.clone().unwrap_or_default(),
                    description: form
                        .description
                        .as_set()
                        .cloned()
                        .unwrap_or_default(),
                })
            }
            (ActionName::EditProject, Prompt::Form { form: Form::Project(form), .. }) => {
                Box::new(UpdateProject {
                    project_id: target()?,
                    updates: form.clone(),
                })
            }
            (ActionName::EditTask, Prompt::Form { form: Form::Task(form), .. }) => {
                Box::new(UpdateTask {
                    task_id: target()?,
                    updates: form.clone(),
                })
            }
            (ActionName::EditCommit, Prompt::Form { form: Form::Commit(form), .. }) => {
                Box::new(UpdateCommit {
                    commit_id: target()?,
                    updates: form.clone(),
                })
            }
            (ActionName::EditFile, Prompt::Form { form: Form::File(form), .. }) => {
                Box::new(UpdateFile {
                    file_id: target()?,
                    updates: form.clone(),
                })
            }
            (
                ActionName::DeleteProject
                | ActionName::DeleteTask
                | ActionName::DeleteCommit
                | ActionName::DeleteFile,
                Prompt::Confirm { .. },
            ) => Box::new(DeleteEntity { id: target()? }),
            _ => return Err(mismatch()),
        };
        Ok(command)
    }
}

/// Blank description in a form means "no description".
pub fn description_field(text: &str) -> FieldUpdate<String> {
    if text.trim().is_empty() {
        FieldUpdate::Clear
    } else {
        FieldUpdate::Set(text.to_string())
    }
}
