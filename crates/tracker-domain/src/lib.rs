pub mod commands;
pub mod commit;
pub mod dispatcher;
pub mod document;
pub mod editable;
pub mod field_update;
pub mod file;
pub mod id;
pub mod navigation;
pub mod project;
pub mod store;
pub mod task;
pub mod view;
pub mod workspace;

pub use commands::{Command, CommandContext, CommandOutcome};
pub use commit::Commit;
pub use dispatcher::{
    ActionName, ActionRequest, ConfirmOutcome, Dispatcher, Effect, Form, Outcome, PendingAction,
    Prompt, DEFAULT_COMMIT_NAME,
};
pub use document::{Document, EntityKind, EntityPath, Found, SEED_PROJECT_NAME, SEED_TASK_NAME};
pub use editable::{normalize_name, CommitUpdate, FileUpdate, ProjectUpdate, TaskUpdate};
pub use field_update::FieldUpdate;
pub use file::File;
pub use id::{EntityId, IdGenerator};
pub use navigation::NavigationState;
pub use project::Project;
pub use store::EntityStore;
pub use task::{Task, TaskStatus};
pub use tracker_core::ViewMode;
pub use view::{strategy_for, Crumb, Row, View, ViewStrategy};
pub use workspace::Workspace;
