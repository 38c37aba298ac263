use super::{Command, CommandContext, CommandOutcome};
use crate::id::EntityId;
use crate::TaskUpdate;
use tracker_core::TrackerResult;

/// Append a new to-do task to a project
pub struct CreateTask {
    pub project_id: EntityId,
    pub name: String,
}

impl Command for CreateTask {
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome> {
        let task = context.store.create_task(self.project_id, &self.name)?;
        Ok(CommandOutcome::mutated(task.id))
    }

    fn description(&self) -> String {
        format!("Create task: '{}' in project {}", self.name, self.project_id)
    }
}

/// Update task properties (name, status)
pub struct UpdateTask {
    pub task_id: EntityId,
    pub updates: TaskUpdate,
}

impl Command for UpdateTask {
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome> {
        context.store.edit_task(self.task_id, self.updates.clone())?;
        Ok(CommandOutcome::mutated(self.task_id))
    }

    fn description(&self) -> String {
        format!("Update task {}", self.task_id)
    }
}
