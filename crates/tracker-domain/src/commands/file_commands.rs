use super::{Command, CommandContext, CommandOutcome};
use crate::id::EntityId;
use crate::FileUpdate;
use tracker_core::TrackerResult;

/// Append a new file entry to a commit
pub struct CreateFile {
    pub commit_id: EntityId,
    pub name: String,
    pub description: String,
}

impl Command for CreateFile {
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome> {
        let file = context
            .store
            .create_file(self.commit_id, &self.name, &self.description)?;
        Ok(CommandOutcome::mutated(file.id))
    }

    fn description(&self) -> String {
        format!("Create file: '{}' in commit {}", self.name, self.commit_id)
    }
}

/// Update file properties (name, description)
pub struct UpdateFile {
    pub file_id: EntityId,
    pub updates: FileUpdate,
}

impl Command for UpdateFile {
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome> {
        context.store.edit_file(self.file_id, self.updates.clone())?;
        Ok(CommandOutcome::mutated(self.file_id))
    }

    fn description(&self) -> String {
        format!("Update file {}", self.file_id)
    }
}
