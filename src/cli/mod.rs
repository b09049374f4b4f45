//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// Tareas - task and project tracker
#[derive(Parser, Debug)]
#[command(name = "tareas", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: ~/.tareas/tareas.db)
    #[arg(long, global = true, env = "TAREAS_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database and seed the default project
    Init,

    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, env = "TAREAS_BIND")]
        bind: Option<String>,
    },

    /// Project management
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Task management
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print version information
    Version,
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Project Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a new project
    Create(ProjectCreateArgs),

    /// List all projects
    List {
        /// Only projects that accept new tasks
        #[arg(long)]
        assignable: bool,
    },

    /// Show project details
    Show {
        /// Project ID
        id: i64,
    },

    /// Update a project
    Update(ProjectUpdateArgs),

    /// Delete a project (its tasks keep the reference)
    Delete {
        /// Project ID
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct ProjectCreateArgs {
    /// Project name
    pub name: String,

    /// Project description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Free-form start date
    #[arg(long)]
    pub start_date: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProjectUpdateArgs {
    /// Project ID
    pub id: i64,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// New status (Activo, Inactivo)
    #[arg(short, long)]
    pub status: Option<String>,
}

// ============================================================================
// Task Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a new task
    Create(TaskCreateArgs),

    /// List tasks ordered by due date (pending only by default)
    List {
        /// Exact status to filter on
        #[arg(short, long, conflicts_with = "all")]
        status: Option<String>,

        /// Include tasks of every status
        #[arg(long)]
        all: bool,
    },

    /// Show task details
    Show {
        /// Task ID
        id: i64,
    },

    /// Mark a task as completed
    Complete {
        /// Task ID
        id: i64,
    },

    /// Update a task
    Update(TaskUpdateArgs),

    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct TaskCreateArgs {
    /// Task title
    pub title: String,

    /// Task description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Due date (e.g. 2025-03-01)
    #[arg(long)]
    pub due: Option<String>,

    /// Priority (Alta, Media, Baja)
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Owning project ID (default: general project)
    #[arg(long, default_value_t = crate::model::DEFAULT_PROJECT_ID)]
    pub project: i64,
}

#[derive(Args, Debug)]
pub struct TaskUpdateArgs {
    /// Task ID
    pub id: i64,

    /// New title
    #[arg(short, long)]
    pub title: Option<String>,

    /// New description
    #[arg(short, long)]
    pub description: Option<String>,

    /// New due date
    #[arg(long)]
    pub due: Option<String>,

    /// New priority
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Move to another project
    #[arg(long)]
    pub project: Option<i64>,
}
