//! Task CRUD and assignment.

use super::categories::get_category_internal;
use super::lists::{get_list_internal, is_member_internal};
use super::users::get_user_internal;
use super::{now_ms, Database};
use crate::error::StoreError;
use crate::types::Task;
use anyhow::Result;
use rusqlite::{params, Connection, Row};

pub(crate) fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        category_id: row.get("category_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        duration_min: row.get("duration_min")?,
        period_days: row.get("period_days")?,
        assigned_user: row.get("assigned_user")?,
        created_at: row.get("created_at")?,
    })
}

fn validate_duration(duration_min: i64) -> Result<()> {
    if duration_min < 0 {
        return Err(
            StoreError::invalid_value("duration", "Duration must be >= 0 minutes").into(),
        );
    }
    Ok(())
}

fn validate_period(period_days: i64) -> Result<()> {
    // The priority computation divides by the period; a period below one
    // day must never reach the engine.
    if period_days < 1 {
        return Err(StoreError::invalid_value("period", "Period must be >= 1 day").into());
    }
    Ok(())
}

pub(crate) fn get_task_internal(conn: &Connection, task_id: i64) -> Result<Option<Task>> {
    let mut stmt = conn.prepare("SELECT * FROM tasks WHERE id = ?1")?;
    match stmt.query_row(params![task_id], parse_task_row) {
        Ok(task) => Ok(Some(task)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Database {
    /// Create a new task in a category.
    pub fn create_task(
        &self,
        category_id: i64,
        name: &str,
        description: &str,
        duration_min: i64,
        period_days: i64,
    ) -> Result<Task> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::invalid_value("name", "Task name must not be empty").into());
        }
        validate_duration(duration_min)?;
        validate_period(period_days)?;
        self.with_conn(|conn| {
            if get_category_internal(conn, category_id)?.is_none() {
                return Err(StoreError::category_not_found(category_id).into());
            }
            let created_at = now_ms();
            conn.execute(
                "INSERT INTO tasks (category_id, name, description, duration_min, period_days, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![category_id, name, description, duration_min, period_days, created_at],
            )?;
            Ok(Task {
                id: conn.last_insert_rowid(),
                category_id,
                name: name.to_string(),
                description: description.to_string(),
                duration_min,
                period_days,
                assigned_user: None,
                created_at,
            })
        })
    }

    /// Look up a task by id.
    pub fn get_task(&self, task_id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| get_task_internal(conn, task_id))
    }

    /// Update a task's editable fields. `None` leaves a field unchanged.
    pub fn update_task(
        &self,
        task_id: i64,
        name: Option<&str>,
        description: Option<&str>,
        duration_min: Option<i64>,
        period_days: Option<i64>,
    ) -> Result<Task> {
        if let Some(name) = name
            && name.trim().is_empty()
        {
            return Err(StoreError::invalid_value("name", "Task name must not be empty").into());
        }
        if let Some(d) = duration_min {
            validate_duration(d)?;
        }
        if let Some(p) = period_days {
            validate_period(p)?;
        }
        self.with_conn(|conn| {
            let Some(task) = get_task_internal(conn, task_id)? else {
                return Err(StoreError::task_not_found(task_id).into());
            };
            let new_name = name.map(str::trim).unwrap_or(&task.name);
            let new_description = description.unwrap_or(&task.description);
            let new_duration = duration_min.unwrap_or(task.duration_min);
            let new_period = period_days.unwrap_or(task.period_days);
            conn.execute(
                "UPDATE tasks SET name = ?1, description = ?2, duration_min = ?3, period_days = ?4
                 WHERE id = ?5",
                params![new_name, new_description, new_duration, new_period, task_id],
            )?;
            get_task_internal(conn, task_id)?
                .ok_or_else(|| StoreError::task_not_found(task_id).into())
        })
    }

    /// Delete a task; completion records cascade.
    pub fn delete_task(&self, task_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;
            if changed == 0 {
                return Err(StoreError::task_not_found(task_id).into());
            }
            Ok(())
        })
    }

    /// Assign a task to a user.
    ///
    /// The user must be a member of the list that owns the task; this is
    /// the same integrity rule the membership guard enforces for reads.
    pub fn assign_task(&self, task_id: i64, user: &str) -> Result<Task> {
        self.with_conn(|conn| {
            let Some(task) = get_task_internal(conn, task_id)? else {
                return Err(StoreError::task_not_found(task_id).into());
            };
            if get_user_internal(conn, user)?.is_none() {
                return Err(StoreError::user_not_found(user).into());
            }
            let Some(category) = get_category_internal(conn, task.category_id)? else {
                return Err(StoreError::category_not_found(task.category_id).into());
            };
            if get_list_internal(conn, category.list_id)?.is_none() {
                return Err(StoreError::list_not_found(category.list_id).into());
            }
            if !is_member_internal(conn, category.list_id, user)? {
                return Err(StoreError::not_a_member(user, category.list_id).into());
            }
            conn.execute(
                "UPDATE tasks SET assigned_user = ?1 WHERE id = ?2",
                params![user, task_id],
            )?;
            get_task_internal(conn, task_id)?
                .ok_or_else(|| StoreError::task_not_found(task_id).into())
        })
    }

    /// Clear a task's assigned user.
    pub fn unassign_task(&self, task_id: i64) -> Result<Task> {
        self.with_conn(|conn| {
            if get_task_internal(conn, task_id)?.is_none() {
                return Err(StoreError::task_not_found(task_id).into());
            }
            conn.execute(
                "UPDATE tasks SET assigned_user = NULL WHERE id = ?1",
                params![task_id],
            )?;
            get_task_internal(conn, task_id)?
                .ok_or_else(|| StoreError::task_not_found(task_id).into())
        })
    }

    /// Tasks of one category, oldest first.
    pub fn tasks_in_category(&self, category_id: i64) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            if get_category_internal(conn, category_id)?.is_none() {
                return Err(StoreError::category_not_found(category_id).into());
            }
            let mut stmt =
                conn.prepare("SELECT * FROM tasks WHERE category_id = ?1 ORDER BY id")?;
            let tasks = stmt
                .query_map(params![category_id], parse_task_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tasks)
        })
    }

    /// All tasks of a list across its categories, oldest first.
    pub fn tasks_in_list(&self, list_id: i64) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            if get_list_internal(conn, list_id)?.is_none() {
                return Err(StoreError::list_not_found(list_id).into());
            }
            let mut stmt = conn.prepare(
                "SELECT t.* FROM tasks t
                 JOIN task_categories c ON t.category_id = c.id
                 WHERE c.list_id = ?1
                 ORDER BY t.id",
            )?;
            let tasks = stmt
                .query_map(params![list_id], parse_task_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(tasks)
        })
    }
}
