//! Structured error types for store operations.

use serde::Serialize;
use std::fmt;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors
    InvalidFieldValue,

    // Not found errors
    UserNotFound,
    ListNotFound,
    CategoryNotFound,
    TaskNotFound,
    DoneNotFound,

    // Conflict errors
    AlreadyExists,
    NotAMember,
    AlreadyMember,

    // Internal errors
    DatabaseError,
    InternalError,
}

/// Structured error carrying a machine-readable code plus a message.
#[derive(Debug, Serialize)]
pub struct StoreError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl StoreError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    // Convenience constructors

    pub fn invalid_value(field: &str, reason: &str) -> Self {
        Self::new(ErrorCode::InvalidFieldValue, reason).with_field(field)
    }

    pub fn user_not_found(name: &str) -> Self {
        Self::new(ErrorCode::UserNotFound, format!("User not found: {}", name))
    }

    pub fn list_not_found(id: i64) -> Self {
        Self::new(
            ErrorCode::ListNotFound,
            format!("Task list not found: {}", id),
        )
    }

    pub fn category_not_found(id: i64) -> Self {
        Self::new(
            ErrorCode::CategoryNotFound,
            format!("Task category not found: {}", id),
        )
    }

    pub fn task_not_found(id: i64) -> Self {
        Self::new(ErrorCode::TaskNotFound, format!("Task not found: {}", id))
    }

    pub fn done_not_found(id: i64) -> Self {
        Self::new(
            ErrorCode::DoneNotFound,
            format!("Completion record not found: {}", id),
        )
    }

    pub fn already_exists(what: &str) -> Self {
        Self::new(ErrorCode::AlreadyExists, format!("{} already exists", what))
    }

    pub fn not_a_member(user: &str, list_id: i64) -> Self {
        Self::new(
            ErrorCode::NotAMember,
            format!("User {} is not a member of list {}", user, list_id),
        )
    }

    pub fn already_member(user: &str, list_id: i64) -> Self {
        Self::new(
            ErrorCode::AlreadyMember,
            format!("User {} is already a member of list {}", user, list_id),
        )
    }

    pub fn database(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, err.to_string())
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

// Allow using ? with anyhow errors by converting them
impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        // Try to downcast to StoreError first
        match err.downcast::<StoreError>() {
            Ok(store_err) => store_err,
            Err(err) => StoreError::internal(err),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
