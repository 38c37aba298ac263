use super::{Command, CommandContext, CommandOutcome};
use crate::id::EntityId;
use crate::ProjectUpdate;
use tracker_core::TrackerResult;

/// Append a new project to the root of the document
pub struct CreateProject {
    pub name: String,
}

impl Command for CreateProject {
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome> {
        let project = context.store.create_project(&self.name)?;
        Ok(CommandOutcome::mutated(project.id))
    }

    fn description(&self) -> String {
        format!("Create project: '{}'", self.name)
    }
}

/// Update project properties (name)
pub struct UpdateProject {
    pub project_id: EntityId,
    pub updates: ProjectUpdate,
}

impl Command for UpdateProject {
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome> {
        context
            .store
            .edit_project(self.project_id, self.updates.clone())?;
        Ok(CommandOutcome::mutated(self.project_id))
    }

    fn description(&self) -> String {
        format!("Update project {}", self.project_id)
    }
}
