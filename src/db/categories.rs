//! Task category CRUD.

use super::lists::get_list_internal;
use super::Database;
use crate::error::StoreError;
use crate::types::TaskCategory;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

pub(crate) fn get_category_internal(
    conn: &Connection,
    category_id: i64,
) -> Result<Option<TaskCategory>> {
    let category = conn
        .query_row(
            "SELECT id, list_id, name FROM task_categories WHERE id = ?1",
            params![category_id],
            |row| {
                Ok(TaskCategory {
                    id: row.get(0)?,
                    list_id: row.get(1)?,
                    name: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(category)
}

impl Database {
    /// Create a category in a task list.
    pub fn create_category(&self, list_id: i64, name: &str) -> Result<TaskCategory> {
        let name = name.trim();
        if name.is_empty() {
            return Err(
                StoreError::invalid_value("name", "Category name must not be empty").into(),
            );
        }
        self.with_conn(|conn| {
            if get_list_internal(conn, list_id)?.is_none() {
                return Err(StoreError::list_not_found(list_id).into());
            }
            conn.execute(
                "INSERT INTO task_categories (list_id, name) VALUES (?1, ?2)",
                params![list_id, name],
            )?;
            Ok(TaskCategory {
                id: conn.last_insert_rowid(),
                list_id,
                name: name.to_string(),
            })
        })
    }

    /// Look up a category by id.
    pub fn get_category(&self, category_id: i64) -> Result<Option<TaskCategory>> {
        self.with_conn(|conn| get_category_internal(conn, category_id))
    }

    /// Categories of a list, oldest first.
    pub fn categories_in_list(&self, list_id: i64) -> Result<Vec<TaskCategory>> {
        self.with_conn(|conn| {
            if get_list_internal(conn, list_id)?.is_none() {
                return Err(StoreError::list_not_found(list_id).into());
            }
            let mut stmt = conn.prepare(
                "SELECT id, list_id, name FROM task_categories WHERE list_id = ?1 ORDER BY id",
            )?;
            let categories = stmt
                .query_map(params![list_id], |row| {
                    Ok(TaskCategory {
                        id: row.get(0)?,
                        list_id: row.get(1)?,
                        name: row.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(categories)
        })
    }

    /// Rename a category.
    pub fn rename_category(&self, category_id: i64, name: &str) -> Result<TaskCategory> {
        let name = name.trim();
        if name.is_empty() {
            return Err(
                StoreError::invalid_value("name", "Category name must not be empty").into(),
            );
        }
        self.with_conn(|conn| {
            let Some(mut category) = get_category_internal(conn, category_id)? else {
                return Err(StoreError::category_not_found(category_id).into());
            };
            conn.execute(
                "UPDATE task_categories SET name = ?1 WHERE id = ?2",
                params![name, category_id],
            )?;
            category.name = name.to_string();
            Ok(category)
        })
    }

    /// Delete a category; its tasks and their completion records cascade.
    pub fn delete_category(&self, category_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "DELETE FROM task_categories WHERE id = ?1",
                params![category_id],
            )?;
            if changed == 0 {
                return Err(StoreError::category_not_found(category_id).into());
            }
            Ok(())
        })
    }
}
