//! Task list CRUD and membership management.

use super::users::get_user_internal;
use super::{now_ms, Database};
use crate::error::StoreError;
use crate::types::TaskList;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub(crate) fn get_list_internal(conn: &Connection, list_id: i64) -> Result<Option<TaskList>> {
    let list = conn
        .query_row(
            "SELECT id, name, created_at FROM task_lists WHERE id = ?1",
            params![list_id],
            |row| {
                Ok(TaskList {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(list)
}

/// Membership guard: is `user` a member of `list_id`?
pub(crate) fn is_member_internal(conn: &Connection, list_id: i64, user: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM list_members WHERE list_id = ?1 AND user_name = ?2",
        params![list_id, user],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

impl Database {
    /// Create a new task list.
    pub fn create_list(&self, name: &str) -> Result<TaskList> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::invalid_value("name", "List name must not be empty").into());
        }
        self.with_conn(|conn| {
            let created_at = now_ms();
            conn.execute(
                "INSERT INTO task_lists (name, created_at) VALUES (?1, ?2)",
                params![name, created_at],
            )?;
            let id = conn.last_insert_rowid();
            Ok(TaskList {
                id,
                name: name.to_string(),
                created_at,
            })
        })
    }

    /// Look up a task list by id.
    pub fn get_list(&self, list_id: i64) -> Result<Option<TaskList>> {
        self.with_conn(|conn| get_list_internal(conn, list_id))
    }

    /// All task lists, oldest first.
    pub fn list_lists(&self) -> Result<Vec<TaskList>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, created_at FROM task_lists ORDER BY id")?;
            let lists = stmt
                .query_map([], |row| {
                    Ok(TaskList {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        created_at: row.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lists)
        })
    }

    /// Rename a task list.
    pub fn rename_list(&self, list_id: i64, name: &str) -> Result<TaskList> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::invalid_value("name", "List name must not be empty").into());
        }
        self.with_conn(|conn| {
            let Some(mut list) = get_list_internal(conn, list_id)? else {
                return Err(StoreError::list_not_found(list_id).into());
            };
            conn.execute(
                "UPDATE task_lists SET name = ?1 WHERE id = ?2",
                params![name, list_id],
            )?;
            list.name = name.to_string();
            Ok(list)
        })
    }

    /// Delete a task list. Categories, tasks, and completion records under
    /// it are removed by cascade, as are membership rows.
    pub fn delete_list(&self, list_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM task_lists WHERE id = ?1", params![list_id])?;
            if changed == 0 {
                return Err(StoreError::list_not_found(list_id).into());
            }
            Ok(())
        })
    }

    /// Add a user to a list's member set.
    pub fn add_member(&self, list_id: i64, user: &str) -> Result<()> {
        self.with_conn(|conn| {
            if get_list_internal(conn, list_id)?.is_none() {
                return Err(StoreError::list_not_found(list_id).into());
            }
            if get_user_internal(conn, user)?.is_none() {
                return Err(StoreError::user_not_found(user).into());
            }
            if is_member_internal(conn, list_id, user)? {
                return Err(StoreError::already_member(user, list_id).into());
            }
            conn.execute(
                "INSERT INTO list_members (list_id, user_name, added_at) VALUES (?1, ?2, ?3)",
                params![list_id, user, now_ms()],
            )?;
            Ok(())
        })
    }

    /// Remove a user from a list's member set.
    ///
    /// Any of the list's tasks assigned to the user are unassigned first:
    /// a task's assignee must always be a member of the owning list.
    pub fn remove_member(&self, list_id: i64, user: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            if get_list_internal(&tx, list_id)?.is_none() {
                return Err(StoreError::list_not_found(list_id).into());
            }
            if !is_member_internal(&tx, list_id, user)? {
                return Err(StoreError::not_a_member(user, list_id).into());
            }
            tx.execute(
                "UPDATE tasks SET assigned_user = NULL
                 WHERE assigned_user = ?1
                   AND category_id IN (SELECT id FROM task_categories WHERE list_id = ?2)",
                params![user, list_id],
            )?;
            tx.execute(
                "DELETE FROM list_members WHERE list_id = ?1 AND user_name = ?2",
                params![list_id, user],
            )?;
            tx.commit()?;
            Ok(())
        })
    }

    /// Member user names of a list, ordered by name.
    pub fn members(&self, list_id: i64) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            if get_list_internal(conn, list_id)?.is_none() {
                return Err(StoreError::list_not_found(list_id).into());
            }
            let mut stmt = conn.prepare(
                "SELECT user_name FROM list_members WHERE list_id = ?1 ORDER BY user_name",
            )?;
            let members = stmt
                .query_map(params![list_id], |row| row.get(0))?
                .collect::<Result<Vec<String>, _>>()?;
            Ok(members)
        })
    }

    /// Membership guard for the access layer: is `user` a member of `list_id`?
    pub fn is_member(&self, list_id: i64, user: &str) -> Result<bool> {
        self.with_conn(|conn| is_member_internal(conn, list_id, user))
    }
}
