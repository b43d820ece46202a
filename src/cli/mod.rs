//! CLI command definitions for chorewheel
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Args, Parser, Subcommand};

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE: &str = "chorewheel.db";

/// Chorewheel: shared recurring-task tracking and scheduling
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to database file
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Output format for view commands: text (default) or json
    #[arg(short, long, default_value = "text", global = true)]
    pub format: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage users
    #[command(subcommand)]
    User(UserCommand),

    /// Manage task lists, memberships, and list views
    #[command(subcommand)]
    List(ListCommand),

    /// Manage task categories
    #[command(subcommand)]
    Category(CategoryCommand),

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommand),

    /// Manage completion records
    #[command(subcommand)]
    Done(DoneCommand),
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a user
    Add { name: String },
    /// List all users
    Ls,
    /// Delete a user (clears their assignments and memberships)
    Rm { name: String },
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// Create a task list
    Create { name: String },
    /// Show all task lists
    Ls,
    /// Rename a task list
    Rename { list_id: i64, name: String },
    /// Delete a task list and everything in it
    Rm { list_id: i64 },
    /// Show a list's tasks, most overdue first
    Todo { list_id: i64 },
    /// Show a list's workload summary
    Summary { list_id: i64 },
    /// Add a user to a list
    AddMember { list_id: i64, user: String },
    /// Remove a user from a list (unassigns their tasks in it)
    RmMember { list_id: i64, user: String },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Create a category in a list
    Create { list_id: i64, name: String },
    /// Show a list's categories with their daily load
    Ls { list_id: i64 },
    /// Rename a category
    Rename { category_id: i64, name: String },
    /// Delete a category and its tasks
    Rm { category_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// Create a task
    Create(TaskCreateArgs),
    /// Show a task with its completion history
    Show { task_id: i64 },
    /// Modify a task's fields
    Modify(TaskModifyArgs),
    /// Delete a task and its history
    Rm { task_id: i64 },
    /// Assign a task to a list member
    Assign { task_id: i64, user: String },
    /// Clear a task's assignee
    Unassign { task_id: i64 },
    /// Seed a random completion within the task's current cycle
    Backfill { task_id: i64 },
}

/// Arguments for task creation
#[derive(Args, Debug)]
pub struct TaskCreateArgs {
    /// Category the task belongs to
    pub category_id: i64,
    /// Task name
    pub name: String,
    /// Nominal duration in minutes (>= 0)
    #[arg(short = 'm', long)]
    pub duration: i64,
    /// Recurrence period in days (>= 1)
    #[arg(short, long)]
    pub period: i64,
    /// Free-text description
    #[arg(long, default_value = "")]
    pub description: String,
}

/// Arguments for task modification; omitted fields are left unchanged
#[derive(Args, Debug)]
pub struct TaskModifyArgs {
    pub task_id: i64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(short = 'm', long)]
    pub duration: Option<i64>,
    #[arg(short, long)]
    pub period: Option<i64>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum DoneCommand {
    /// Record a completion (defaults to now)
    Add(DoneAddArgs),
    /// Show a task's completion history, newest first
    Ls { task_id: i64 },
    /// Delete a completion record
    Rm { done_id: i64 },
}

/// Arguments for recording a completion
#[derive(Args, Debug)]
pub struct DoneAddArgs {
    pub task_id: i64,
    /// Completion time as RFC 3339 (default: now)
    #[arg(short, long)]
    pub when: Option<String>,
    /// Minutes actually spent (optional, independent of the nominal duration)
    #[arg(short = 'm', long)]
    pub duration: Option<i64>,
}
