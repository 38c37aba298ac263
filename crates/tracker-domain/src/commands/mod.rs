use serde::Serialize;
use tracker_core::TrackerResult;

use crate::id::EntityId;
use crate::{EntityStore, NavigationState};

pub mod commit_commands;
pub mod entity_commands;
pub mod file_commands;
pub mod navigation_commands;
pub mod project_commands;
pub mod task_commands;

pub use commit_commands::*;
pub use entity_commands::*;
pub use file_commands::*;
pub use navigation_commands::*;
pub use project_commands::*;
pub use task_commands::*;

/// Trait for domain commands that mutate state
/// Commands represent intent and can be executed, queued, and described
pub trait Command: Send + Sync {
    /// Execute this command, mutating the domain state
    fn execute(&self, context: &mut CommandContext) -> TrackerResult<CommandOutcome>;

    /// Human-readable description of what this command does
    fn description(&self) -> String;
}

/// Context passed to commands for mutation
pub struct CommandContext<'a> {
    pub store: &'a mut EntityStore,
    pub navigation: &'a mut NavigationState,
}

/// What a successful command did, so hosts know whether to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    /// The entity created, edited, toggled, deleted or selected.
    pub touched: Option<EntityId>,
    /// Whether the document changed and needs saving.
    pub persist: bool,
}

impl CommandOutcome {
    pub fn mutated(id: EntityId) -> Self {
        Self {
            touched: Some(id),
            persist: true,
        }
    }

    pub fn navigated(id: Option<EntityId>) -> Self {
        Self {
            touched: id,
            persist: false,
        }
    }
}
