use super::{Command, CommandContext, CommandOutcome};
use crate::id::EntityId;
use crate::CommitUpdate;
use tracker_core::TrackerResult;

/// Append a new commit to a task
pub struct CreateCommit {
    pub task_id: EntityId,
    pub name: String,
}

impl Command for CreateCommit {
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome> {
        let commit = context.store.create_commit(self.task_id, &self.name)?;
        Ok(CommandOutcome::mutated(commit.id))
    }

    fn description(&self) -> String {
        format!("Create commit: '{}' in task {}", self.name, self.task_id)
    }
}

/// Update commit properties (name)
pub struct UpdateCommit {
    pub commit_id: EntityId,
    pub updates: CommitUpdate,
}

impl Command for UpdateCommit {
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome> {
        context
            .store
            .edit_commit(self.commit_id, self.updates.clone())?;
        Ok(CommandOutcome::mutated(self.commit_id))
    }

    fn description(&self) -> String {
        format!("Update commit {}", self.commit_id)
    }
}
