//! The single owning context for in-memory state.
//!
//! One `Workspace` holds the entity store and the navigation state. There is
//! exactly one writer: whoever holds `&mut Workspace`. Hosts that share it
//! across threads must serialize access themselves.

use tracker_core::TrackerResult;

use crate::commands::{Command, CommandContext, CommandOutcome};
use crate::document::Document;
use crate::navigation::NavigationState;
use crate::store::EntityStore;

#[derive(Debug, Clone, Default)]
pub struct Workspace {
    pub store: EntityStore,
    pub navigation: NavigationState,
}

impl Workspace {
    pub fn new(document: Document) -> Self {
        Self {
            store: EntityStore::new(document),
            navigation: NavigationState::new(),
        }
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn execute(&mut self, command: &dyn Command) -> TrackerResult<CommandOutcome> {
        tracing::debug!("Executing: {}", command.description());
        let mut context = CommandContext {
            store: &mut self.store,
            navigation: &mut self.navigation,
        };
        command.execute(&mut context)
    }

    /// Swap the whole tree (import) and drop selections that no longer resolve.
    pub fn replace_document(&mut self, document: Document) {
        self.store.replace_document(document);
        self.navigation.reconcile(self.store.document());
    }
}
