use super::{Command, CommandContext, CommandOutcome};
use crate::document::EntityKind;
use crate::id::EntityId;
use tracker_core::TrackerResult;

/// Drill into an entity of a given kind
pub struct SelectEntity {
    pub kind: EntityKind,
    pub id: EntityId,
}

impl Command for SelectEntity {
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome> {
        let document = context.store.document();
        match self.kind {
            EntityKind::Project => context.navigation.select_project(document, self.id)?,
            EntityKind::Task => context.navigation.select_task(document, self.id)?,
            EntityKind::Commit => context.navigation.select_commit(document, self.id)?,
            EntityKind::File => context.navigation.select_file(document, self.id)?,
        }
        Ok(CommandOutcome::navigated(Some(self.id)))
    }

    fn description(&self) -> String {
        format!("Select {} {}", self.kind, self.id)
    }
}

/// Step one level up in the drill-down
pub struct NavigateBack;

impl Command for NavigateBack {
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome> {
        context.navigation.back();
        Ok(CommandOutcome::navigated(context.navigation.trail().last().copied()))
    }

    fn description(&self) -> String {
        "Navigate back".to_string()
    }
}
