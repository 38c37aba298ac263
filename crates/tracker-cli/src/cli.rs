use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracker_core::ViewMode;
use tracker_domain::{EntityId, TaskStatus};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Track projects, tasks, commits and files in a local JSON document", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the tracker document (or set TRACKER_FILE env var)
    #[arg(long, global = true, value_name = "FILE", env = "TRACKER_FILE")]
    pub file: Option<PathBuf>,

    /// Use ./tasks.json instead of the platform data directory
    #[arg(long, global = true)]
    pub dev: bool,

    /// Replace the stored document with the default one before running
    #[arg(long, global = true)]
    pub reset: bool,

    /// Presentation used by `show`
    #[arg(long, global = true, value_enum)]
    pub view: Option<ViewArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ViewArg {
    Tree,
    DrillDown,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Tree => ViewMode::Tree,
            ViewArg::DrillDown => ViewMode::DrillDown,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project operations
    Project(ProjectCommand),
    /// Task operations
    Task(TaskCommand),
    /// Commit operations
    Commit(CommitCommand),
    /// File operations
    File(FileCommand),
    /// Render the document
    Show(ShowArgs),
    /// Write the whole document to a file
    Export(ExportArgs),
    /// Replace the whole document with the contents of a file
    Import(ImportArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Project commands
#[derive(Args)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub action: ProjectAction,
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a new project
    Add {
        #[arg(long)]
        name: String,
    },
    /// Rename a project
    Rename {
        #[arg(long)]
        id: EntityId,
        #[arg(long)]
        name: String,
    },
    /// Delete a project and everything in it
    Delete(DeleteArgs),
    /// Collapse or expand a project
    Toggle {
        #[arg(long)]
        id: EntityId,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task in a project
    Add {
        #[arg(long)]
        project: EntityId,
        #[arg(long)]
        name: String,
    },
    /// Update a task
    Edit(TaskEditArgs),
    /// Delete a task and everything in it
    Delete(DeleteArgs),
    /// Collapse or expand a task
    Toggle {
        #[arg(long)]
        id: EntityId,
    },
}

#[derive(Args)]
pub struct TaskEditArgs {
    #[arg(long)]
    pub id: EntityId,
    #[arg(long)]
    pub name: Option<String>,
    /// todo, in-progress or done
    #[arg(long)]
    pub status: Option<TaskStatus>,
}

// Commit commands
#[derive(Args)]
pub struct CommitCommand {
    #[command(subcommand)]
    pub action: CommitAction,
}

#[derive(Subcommand)]
pub enum CommitAction {
    /// Create a new commit in a task
    Add {
        #[arg(long)]
        task: EntityId,
        /// Defaults to "Commit"
        #[arg(long)]
        name: Option<String>,
    },
    /// Rename a commit
    Edit {
        #[arg(long)]
        id: EntityId,
        #[arg(long)]
        name: String,
    },
    /// Delete a commit and its files
    Delete(DeleteArgs),
}

// File commands
#[derive(Args)]
pub struct FileCommand {
    #[command(subcommand)]
    pub action: FileAction,
}

#[derive(Subcommand)]
pub enum FileAction {
    /// Add a file entry to a commit
    Add {
        #[arg(long)]
        commit: EntityId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a file entry
    Edit(FileEditArgs),
    /// Delete a file entry
    Delete(DeleteArgs),
}

#[derive(Args)]
pub struct FileEditArgs {
    #[arg(long)]
    pub id: EntityId,
    #[arg(long)]
    pub name: Option<String>,
    /// Pass an empty string to remove the description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct DeleteArgs {
    #[arg(long)]
    pub id: EntityId,
    /// Confirm the deletion; without it nothing is removed
    #[arg(long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Drill into this project
    #[arg(long)]
    pub project: Option<EntityId>,
    /// Drill into this task (needs --project)
    #[arg(long, requires = "project")]
    pub task: Option<EntityId>,
    /// Drill into this commit (needs --task)
    #[arg(long, requires = "task")]
    pub commit: Option<EntityId>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Destination path
    pub path: PathBuf,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Source path
    pub path: PathBuf,
}
