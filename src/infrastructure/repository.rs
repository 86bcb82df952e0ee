//! Repository trait for task rows.
//!
//! Every operation maps to exactly one statement against the store. Absence is
//! reported through the return value (`None`, or zero affected rows), never
//! through an error.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Task, TaskDraft, TaskId};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Database connection or statement error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored row could not be mapped back into a task.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        Self::DatabaseError(error.to_string())
    }
}

// =============================================================================
// Task Repository
// =============================================================================

/// Storage row mapper for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Lists every stored task. May be empty.
    async fn list(&self) -> Result<Vec<Task>, RepositoryError>;

    /// Finds a task by its ID.
    ///
    /// Returns `Ok(Some(task))` if found, `Ok(None)` if not found,
    /// or an error if the operation fails.
    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError>;

    /// Inserts a new task and returns the stored row, including its generated ID.
    async fn insert(&self, draft: &TaskDraft) -> Result<Task, RepositoryError>;

    /// Replaces all mutable fields of an existing task.
    ///
    /// Returns `Ok(None)` if no task has the given ID.
    async fn update(&self, id: TaskId, draft: &TaskDraft) -> Result<Option<Task>, RepositoryError>;

    /// Deletes a task by its ID.
    ///
    /// Returns the number of affected rows: `1` if the task was deleted,
    /// `0` if it didn't exist.
    async fn delete(&self, id: TaskId) -> Result<u64, RepositoryError>;
}
