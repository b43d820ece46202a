//! User CRUD.
//!
//! Users are plain rows keyed by name; authentication is out of scope.

use super::{now_ms, Database};
use crate::error::StoreError;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use crate::types::User;

pub(crate) fn get_user_internal(conn: &Connection, name: &str) -> Result<Option<User>> {
    let user = conn
        .query_row(
            "SELECT name, created_at FROM users WHERE name = ?1",
            params![name],
            |row| {
                Ok(User {
                    name: row.get(0)?,
                    created_at: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(user)
}

impl Database {
    /// Create a new user.
    pub fn create_user(&self, name: &str) -> Result<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::invalid_value("name", "User name must not be empty").into());
        }
        self.with_conn(|conn| {
            if get_user_internal(conn, name)?.is_some() {
                return Err(StoreError::already_exists(&format!("User {}", name)).into());
            }
            let created_at = now_ms();
            conn.execute(
                "INSERT INTO users (name, created_at) VALUES (?1, ?2)",
                params![name, created_at],
            )?;
            Ok(User {
                name: name.to_string(),
                created_at,
            })
        })
    }

    /// Look up a user by name.
    pub fn get_user(&self, name: &str) -> Result<Option<User>> {
        self.with_conn(|conn| get_user_internal(conn, name))
    }

    /// All users, ordered by name.
    pub fn list_users(&self) -> Result<Vec<User>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT name, created_at FROM users ORDER BY name")?;
            let users = stmt
                .query_map([], |row| {
                    Ok(User {
                        name: row.get(0)?,
                        created_at: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(users)
        })
    }

    /// Delete a user.
    ///
    /// Clears the user's task assignments and list memberships explicitly
    /// before removing the row; assignment clearing is application logic,
    /// not a schema cascade.
    pub fn delete_user(&self, name: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            if get_user_internal(&tx, name)?.is_none() {
                return Err(StoreError::user_not_found(name).into());
            }
            tx.execute(
                "UPDATE tasks SET assigned_user = NULL WHERE assigned_user = ?1",
                params![name],
            )?;
            tx.execute("DELETE FROM list_members WHERE user_name = ?1", params![name])?;
            tx.execute("DELETE FROM users WHERE name = ?1", params![name])?;
            tx.commit()?;
            Ok(())
        })
    }
}
