//! Task service.
//!
//! Thin orchestration over a `TaskRepository`. The service is the only layer
//! that sees both request DTOs and storage rows; every row it returns is
//! projected to `TaskResponse`. Absence is reported through `Lookup::Absent`
//! instead of an error so that handlers can map it to a 404 while storage
//! failures stay on the `Err` path.

use std::sync::Arc;

use crate::api::dto::{CreateTaskRequest, DeletedTaskResponse, TaskResponse, UpdateTaskRequest};
use crate::domain::TaskId;
use crate::infrastructure::{RepositoryError, TaskRepository};

/// Outcome of an operation addressed to a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The task existed.
    Found(T),
    /// No task has the requested ID.
    Absent,
}

impl<T> Lookup<T> {
    /// Converts an `Option` produced by storage.
    #[must_use]
    pub fn from_option(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::Found)
    }

    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Absent => None,
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Applies `function` to a found value.
    pub fn map<U>(self, function: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(function(value)),
            Self::Absent => Lookup::Absent,
        }
    }

    /// Turns `Absent` into the error produced by `error`.
    ///
    /// # Errors
    ///
    /// Returns `error()` when the task was absent.
    pub fn ok_or_else<E>(self, error: impl FnOnce() -> E) -> Result<T, E> {
        match self {
            Self::Found(value) => Ok(value),
            Self::Absent => Err(error()),
        }
    }
}

/// Application service for task CRUD.
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository + Send + Sync>,
}

impl std::fmt::Debug for TaskService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("TaskService").finish_non_exhaustive()
    }
}

impl TaskService {
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Returns every task in ascending ID order.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn list(&self) -> Result<Vec<TaskResponse>, RepositoryError> {
        let tasks = self.repository.list().await?;
        tracing::debug!(count = tasks.len(), "Listed tasks");
        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    /// Fetches a single task.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn get_by_id(&self, id: TaskId) -> Result<Lookup<TaskResponse>, RepositoryError> {
        let task = self.repository.find_by_id(id).await?;
        Ok(Lookup::from_option(task).map(TaskResponse::from))
    }

    /// Inserts a task and returns it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn create(&self, request: CreateTaskRequest) -> Result<TaskResponse, RepositoryError> {
        let task = self.repository.insert(&request.into_draft()).await?;
        tracing::debug!(task_id = %task.id, "Created task");
        Ok(TaskResponse::from(task))
    }

    /// Replaces every mutable field of an existing task.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> Result<Lookup<TaskResponse>, RepositoryError> {
        let updated = self.repository.update(id, &request.into_draft()).await?;
        if updated.is_some() {
            tracing::debug!(task_id = %id, "Updated task");
        }
        Ok(Lookup::from_option(updated).map(TaskResponse::from))
    }

    /// Removes a task and echoes its ID.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    pub async fn delete(&self, id: TaskId) -> Result<Lookup<DeletedTaskResponse>, RepositoryError> {
        let removed = self.repository.delete(id).await?;
        if removed == 0 {
            return Ok(Lookup::Absent);
        }
        tracing::debug!(task_id = %id, "Deleted task");
        Ok(Lookup::Found(DeletedTaskResponse { id }))
    }
}
