use super::{Command, CommandContext, CommandOutcome};
use crate::id::EntityId;
use tracker_core::TrackerResult;

/// Delete any entity together with its subtree
///
/// Selections pointing into the removed subtree are cleared.
pub struct DeleteEntity {
    pub id: EntityId,
}

impl Command for DeleteEntity {
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome> {
        let removed = context.store.delete(self.id)?;
        context.navigation.clear_removed(&removed);
        Ok(CommandOutcome::mutated(self.id))
    }

    fn description(&self) -> String {
        format!("Delete entity {}", self.id)
    }
}

/// Flip the collapsed flag of a project or task
pub struct ToggleCollapse {
    pub id: EntityId,
}

impl Command for ToggleCollapse {
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome> {
        context.store.toggle_collapse(self.id)?;
        Ok(CommandOutcome::mutated(self.id))
    }

    fn description(&self) -> String {
        format!("Toggle collapse of {}", self.id)
    }
}
