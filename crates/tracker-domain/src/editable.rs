use crate::{Commit, EntityKind, FieldUpdate, File, Project, Task, TaskStatus};
use tracker_core::{Editable, TrackerError, TrackerResult};

/// Trim a submitted name, rejecting blank input.
pub fn normalize_name(raw: &str, kind: EntityKind) -> TrackerResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::Validation(format!(
            "{} name must not be empty",
            kind
        )));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitUpdate {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUpdate {
    pub name: Option<String>,
    pub description: FieldUpdate<String>,
}

impl Editable<Project> for ProjectUpdate {
    fn from_entity(project: &Project) -> Self {
        Self {
            name: Some(project.name.clone()),
        }
    }

    fn apply_to(self, project: &mut Project) -> TrackerResult<()> {
        if let Some(name) = self.name {
            project.update_name(normalize_name(&name, EntityKind::Project)?);
        }
        Ok(())
    }
}

impl Editable<Task> for TaskUpdate {
    fn from_entity(task: &Task) -> Self {
        Self {
            name: Some(task.name.clone()),
            status: Some(task.status),
        }
    }

    fn apply_to(self, task: &mut Task) -> TrackerResult<()> {
        // Validate before touching anything so a rejected edit changes nothing.
        let name = self
            .name
            .map(|name| normalize_name(&name, EntityKind::Task))
            .transpose()?;
        if let Some(name) = name {
            task.update_name(name);
        }
        if let Some(status) = self.status {
            task.update_status(status);
        }
        Ok(())
    }
}

impl Editable<Commit> for CommitUpdate {
    fn from_entity(commit: &Commit) -> Self {
        Self {
            name: Some(commit.name.clone()),
        }
    }

    fn apply_to(self, commit: &mut Commit) -> TrackerResult<()> {
        if let Some(name) = self.name {
            commit.update_name(normalize_name(&name, EntityKind::Commit)?);
        }
        Ok(())
    }
}

impl Editable<File> for FileUpdate {
    fn from_entity(file: &File) -> Self {
        Self {
            name: Some(file.name.clone()),
            description: if file.has_description() {
                FieldUpdate::Set(file.description.clone())
            } else {
                FieldUpdate::Clear
            },
        }
    }

    fn apply_to(self, file: &mut File) -> TrackerResult<()> {
        let name = self
            .name
            .map(|name| normalize_name(&name, EntityKind::File))
            .transpose()?;
        if let Some(name) = name {
            file.update_name(name);
        }
        let description = match self.description {
            FieldUpdate::Set(text) => FieldUpdate::Set(text.trim().to_string()),
            other => other,
        };
        description.apply_to(&mut file.description);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_trims() {
        assert_eq!(
            normalize_name("  Release  ", EntityKind::Project).unwrap(),
            "Release"
        );
    }

    #[test]
    fn test_normalize_name_rejects_whitespace() {
        let err = normalize_name("   ", EntityKind::Task).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_task_form_prefills_from_entity() {
        let mut task = Task::new(1, "Write docs".to_string());
        task.update_status(TaskStatus::InProgress);
        let form = TaskUpdate::from_entity(&task);
        assert_eq!(form.name.as_deref(), Some("Write docs"));
        assert_eq!(form.status, Some(TaskStatus::InProgress));
    }

    #[test]
    fn test_rejected_task_edit_changes_nothing() {
        let mut task = Task::new(1, "Write docs".to_string());
        let update = TaskUpdate {
            name: Some("   ".to_string()),
            status: Some(TaskStatus::Done),
        };
        assert!(update.apply_to(&mut task).is_err());
        assert_eq!(task.name, "Write docs");
        assert_eq!(task.status, TaskStatus::ToDo);
    }

    #[test]
    fn test_file_update_trims_and_clears_description() {
        let mut file = File::new(1, "main.rs".to_string(), String::new());
        FileUpdate {
            name: None,
            description: FieldUpdate::Set("  entry point ".to_string()),
        }
        .apply_to(&mut file)
        .unwrap();
        assert_eq!(file.description, "entry point");

        FileUpdate {
            name: None,
            description: FieldUpdate::Clear,
        }
        .apply_to(&mut file)
        .unwrap();
        assert_eq!(file.description, "");
    }

    #[test]
    fn test_file_form_round_trips_blank_description_as_clear() {
        let file = File::new(1, "main.rs".to_string(), String::new());
        assert_eq!(FileUpdate::from_entity(&file).description, FieldUpdate::Clear);
    }
}
