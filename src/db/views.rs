//! Engine-backed views: the overdue-first todo ordering and list summaries.
//!
//! These load a snapshot of the relevant rows and hand it to the engine;
//! nothing here is cached, so results always reflect the current data.

use super::lists::get_list_internal;
use super::tasks::parse_task_row;
use super::Database;
use crate::engine;
use crate::engine::MS_PER_WEEK;
use crate::error::StoreError;
use crate::types::{CategoryLoad, ListSummary, RankedTask, Task};
use anyhow::Result;
use rusqlite::params;

impl Database {
    /// A list's tasks ranked most-overdue-first at time `now_ms`.
    pub fn todo(&self, list_id: i64, now_ms: i64) -> Result<Vec<RankedTask>> {
        let tasks_with_last = self.with_conn(|conn| {
            if get_list_internal(conn, list_id)?.is_none() {
                return Err(StoreError::list_not_found(list_id).into());
            }
            let mut stmt = conn.prepare(
                "SELECT t.*,
                        (SELECT MAX(d.when_ms) FROM task_dones d WHERE d.task_id = t.id)
                            AS last_done
                 FROM tasks t
                 JOIN task_categories c ON t.category_id = c.id
                 WHERE c.list_id = ?1
                 ORDER BY t.id",
            )?;
            let rows = stmt
                .query_map(params![list_id], |row| {
                    let task = parse_task_row(row)?;
                    let last_done: Option<i64> = row.get("last_done")?;
                    Ok((task, last_done))
                })?
                .collect::<Result<Vec<(Task, Option<i64>)>, _>>()?;
            Ok(rows)
        })?;
        Ok(engine::rank(tasks_with_last, now_ms))
    }

    /// Aggregate workload statistics for a list at time `now_ms`.
    pub fn summary(&self, list_id: i64, now_ms: i64) -> Result<ListSummary> {
        let Some(list) = self.get_list(list_id)? else {
            return Err(StoreError::list_not_found(list_id).into());
        };
        let tasks = self.tasks_in_list(list_id)?;
        let dones = self.dones_in_list(list_id)?;
        let members = self.members(list_id)?;
        let categories = self.categories_in_list(list_id)?;

        let minutes_per_day = engine::minutes_per_day(&tasks);
        let hours_per_week = engine::hours_per_week(minutes_per_day);
        let hours_per_week_per_user =
            engine::hours_per_week_per_user(hours_per_week, members.len());
        let minutes_done_last_week =
            engine::minutes_done_since(&tasks, &dones, MS_PER_WEEK, now_ms);
        let hours_done_last_week = minutes_done_last_week as f64 / 60.0;
        let remaining_hours_this_week =
            engine::remaining_hours(hours_per_week, hours_done_last_week);

        let minutes_per_member = members
            .iter()
            .map(|m| (m.clone(), engine::minutes_for_user(&tasks, m)))
            .collect();

        let categories = categories
            .into_iter()
            .map(|c| {
                let load = engine::minutes_per_day(
                    tasks.iter().filter(|t| t.category_id == c.id),
                );
                CategoryLoad {
                    category_id: c.id,
                    name: c.name,
                    minutes_per_day: load,
                }
            })
            .collect();

        Ok(ListSummary {
            list_id,
            name: list.name,
            member_count: members.len(),
            minutes_per_day,
            hours_per_week,
            hours_per_week_per_user,
            hours_done_last_week,
            remaining_hours_this_week,
            minutes_per_member,
            categories,
        })
    }

    /// Daily minute load of one category's tasks.
    pub fn category_minutes_per_day(&self, category_id: i64) -> Result<f64> {
        let tasks = self.tasks_in_category(category_id)?;
        Ok(engine::minutes_per_day(&tasks))
    }
}
