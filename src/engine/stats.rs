//! Aggregate workload reducers over task collections.
//!
//! Every reducer treats an empty or no-match collection as the identity
//! value zero, never as an absent result.

use crate::types::{Task, TaskDone};
use std::collections::HashSet;

/// Minutes of work required per day to keep every task in the collection
/// current: the sum of `duration / period` over all tasks.
pub fn minutes_per_day<'a, I>(tasks: I) -> f64
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .map(|t| t.duration_min as f64 / t.period_days as f64)
        .sum()
}

/// Sum of durations (minutes) over a collection.
pub fn total_duration<I>(durations: I) -> i64
where
    I: IntoIterator<Item = i64>,
{
    durations.into_iter().sum()
}

/// Weekly workload in hours implied by a daily minute load.
pub fn hours_per_week(minutes_per_day: f64) -> f64 {
    minutes_per_day * 7.0 / 60.0
}

/// Weekly workload per list member, or `None` when the list has no members.
pub fn hours_per_week_per_user(hours_per_week: f64, member_count: usize) -> Option<f64> {
    if member_count == 0 {
        None
    } else {
        Some(hours_per_week / member_count as f64)
    }
}

/// Sum of the nominal durations of the distinct tasks with at least one
/// completion inside `[now - window, now]`.
///
/// A task completed three times in the window still contributes its nominal
/// duration once; this measures "did you touch it this cycle", not actual
/// time spent.
pub fn minutes_done_since(tasks: &[Task], dones: &[TaskDone], window_ms: i64, now_ms: i64) -> i64 {
    let cutoff = now_ms - window_ms;
    let touched: HashSet<i64> = dones
        .iter()
        .filter(|d| d.when_ms >= cutoff && d.when_ms <= now_ms)
        .map(|d| d.task_id)
        .collect();
    tasks
        .iter()
        .filter(|t| touched.contains(&t.id))
        .map(|t| t.duration_min)
        .sum()
}

/// Hours of work still outstanding this week, floored at zero.
pub fn remaining_hours(hours_per_week: f64, hours_done: f64) -> f64 {
    (hours_per_week - hours_done).max(0.0)
}

/// Nominal minutes of the tasks assigned to `user`.
pub fn minutes_for_user<'a, I>(tasks: I, user: &str) -> i64
where
    I: IntoIterator<Item = &'a Task>,
{
    total_duration(
        tasks
            .into_iter()
            .filter(|t| t.assigned_user.as_deref() == Some(user))
            .map(|t| t.duration_min),
    )
}
