//! Per-task urgency from completion history.

use crate::types::{RankedTask, Task, TaskDone};
use std::cmp::Ordering;

/// Most recent completion timestamp in a task's history, if any.
pub fn last_done_ms(dones: &[TaskDone]) -> Option<i64> {
    dones.iter().map(|d| d.when_ms).max()
}

/// Urgency of a task at time `now_ms`: the fraction of its recurrence
/// period elapsed since the last completion.
///
/// A task that has never been done is maximally urgent (`f64::INFINITY`).
/// `1.0` means exactly due; values above 1 are overdue, below 1 not yet due.
///
/// Elapsed time is counted in whole seconds (whole days plus the sub-day
/// remainder), so two calls within the same second compare equal.
///
/// Precondition: `period_days >= 1`, enforced when the task is created.
pub fn priority(period_days: i64, last_done_ms: Option<i64>, now_ms: i64) -> f64 {
    match last_done_ms {
        None => f64::INFINITY,
        Some(last) => {
            let elapsed_secs = (now_ms - last) / 1000;
            let elapsed_days = elapsed_secs as f64 / 86_400.0;
            elapsed_days / period_days as f64
        }
    }
}

/// Rank tasks most-overdue-first.
///
/// Each entry pairs a task with its last completion timestamp (or `None`).
/// The sort is stable, so tasks with equal priority keep the order they
/// were supplied in.
pub fn rank(tasks: Vec<(Task, Option<i64>)>, now_ms: i64) -> Vec<RankedTask> {
    let mut ranked: Vec<RankedTask> = tasks
        .into_iter()
        .map(|(task, last)| {
            let priority = priority(task.period_days, last, now_ms);
            RankedTask { task, priority }
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}
