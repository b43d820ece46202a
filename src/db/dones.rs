//! Completion record CRUD.

use super::tasks::get_task_internal;
use super::{now_ms, Database};
use crate::error::StoreError;
use crate::types::{NewTaskDone, TaskDone};
use anyhow::Result;
use rusqlite::params;

impl Database {
    /// Record a completion for a task.
    ///
    /// `when_ms` defaults to now; `duration_min` is the time actually
    /// spent, if the user chose to record it.
    pub fn add_done(
        &self,
        task_id: i64,
        when_ms: Option<i64>,
        duration_min: Option<i64>,
    ) -> Result<TaskDone> {
        if let Some(d) = duration_min
            && d < 0
        {
            return Err(
                StoreError::invalid_value("duration", "Duration must be >= 0 minutes").into(),
            );
        }
        let when_ms = when_ms.unwrap_or_else(now_ms);
        self.with_conn(|conn| {
            if get_task_internal(conn, task_id)?.is_none() {
                return Err(StoreError::task_not_found(task_id).into());
            }
            conn.execute(
                "INSERT INTO task_dones (task_id, when_ms, duration_min) VALUES (?1, ?2, ?3)",
                params![task_id, when_ms, duration_min],
            )?;
            Ok(TaskDone {
                id: conn.last_insert_rowid(),
                task_id,
                when_ms,
                duration_min,
            })
        })
    }

    /// Persist a completion generated by the backfill generator.
    pub fn insert_done(&self, done: &NewTaskDone) -> Result<TaskDone> {
        self.add_done(done.task_id, Some(done.when_ms), done.duration_min)
    }

    /// Delete a completion record.
    pub fn delete_done(&self, done_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM task_dones WHERE id = ?1", params![done_id])?;
            if changed == 0 {
                return Err(StoreError::done_not_found(done_id).into());
            }
            Ok(())
        })
    }

    /// Completion history of a task, newest first.
    pub fn dones_for_task(&self, task_id: i64) -> Result<Vec<TaskDone>> {
        self.with_conn(|conn| {
            if get_task_internal(conn, task_id)?.is_none() {
                return Err(StoreError::task_not_found(task_id).into());
            }
            let mut stmt = conn.prepare(
                "SELECT id, task_id, when_ms, duration_min FROM task_dones
                 WHERE task_id = ?1 ORDER BY when_ms DESC",
            )?;
            let dones = stmt
                .query_map(params![task_id], |row| {
                    Ok(TaskDone {
                        id: row.get(0)?,
                        task_id: row.get(1)?,
                        when_ms: row.get(2)?,
                        duration_min: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(dones)
        })
    }

    /// All completion records for tasks in a list.
    pub fn dones_in_list(&self, list_id: i64) -> Result<Vec<TaskDone>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT d.id, d.task_id, d.when_ms, d.duration_min FROM task_dones d
                 JOIN tasks t ON d.task_id = t.id
                 JOIN task_categories c ON t.category_id = c.id
                 WHERE c.list_id = ?1
                 ORDER BY d.when_ms DESC",
            )?;
            let dones = stmt
                .query_map(params![list_id], |row| {
                    Ok(TaskDone {
                        id: row.get(0)?,
                        task_id: row.get(1)?,
                        when_ms: row.get(2)?,
                        duration_min: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(dones)
        })
    }
}
