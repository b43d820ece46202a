//! Core domain types for Chorewheel.

use serde::{Deserialize, Serialize};

/// A user that can be a member of task lists and be assigned tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user name (primary key).
    pub name: String,
    pub created_at: i64,
}

/// A task list shared by a group of member users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskList {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}

/// A category of tasks within a single task list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCategory {
    pub id: i64,
    pub list_id: i64,
    pub name: String,
}

/// A recurring task.
///
/// `duration_min` is the nominal time the task takes (minutes, >= 0);
/// `period_days` is the intended number of days between completions (>= 1).
/// Both bounds are enforced at creation/modification time, not by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: String,
    pub duration_min: i64,
    pub period_days: i64,
    /// User responsible for the task, if any. Must be a member of the
    /// owning list; cleared explicitly when the user leaves the list.
    pub assigned_user: Option<String>,
    pub created_at: i64,
}

/// A record that a task was completed at a given time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDone {
    pub id: i64,
    pub task_id: i64,
    /// Completion timestamp (epoch milliseconds).
    pub when_ms: i64,
    /// Time actually spent, in minutes, if the user recorded it.
    /// Independent of the task's nominal duration.
    pub duration_min: Option<i64>,
}

/// An unsaved completion record, produced by the backfill generator and
/// persisted by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskDone {
    pub task_id: i64,
    pub when_ms: i64,
    pub duration_min: Option<i64>,
}

/// A task paired with its computed priority, for overdue-first ordering.
#[derive(Debug, Clone, Serialize)]
pub struct RankedTask {
    #[serde(flatten)]
    pub task: Task,
    /// Fraction of the recurrence period elapsed since the last completion.
    /// `f64::INFINITY` for tasks that have never been done (rendered as
    /// `null` in JSON output).
    pub priority: f64,
}

/// Per-category workload within a list summary.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryLoad {
    pub category_id: i64,
    pub name: String,
    pub minutes_per_day: f64,
}

/// Aggregate workload statistics for one task list.
///
/// Recomputed from current data on every request; there is no cached state.
#[derive(Debug, Clone, Serialize)]
pub struct ListSummary {
    pub list_id: i64,
    pub name: String,
    pub member_count: usize,
    pub minutes_per_day: f64,
    pub hours_per_week: f64,
    /// `None` when the list has no members (division by zero is the
    /// caller's problem to present, not ours to invent a value for).
    pub hours_per_week_per_user: Option<f64>,
    pub hours_done_last_week: f64,
    pub remaining_hours_this_week: f64,
    /// Nominal minutes assigned to each member, by user name.
    pub minutes_per_member: Vec<(String, i64)>,
    pub categories: Vec<CategoryLoad>,
}
