//! In-memory repository implementation.
//!
//! Suitable for tests and local development. Rows live in an ordered map
//! behind a `tokio::sync::RwLock`; identifiers come from a sequence that
//! starts at 1 and never hands out the same value twice.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Task, TaskDraft, TaskId};
use crate::infrastructure::{RepositoryError, TaskRepository};

#[derive(Debug)]
struct TaskTable {
    rows: BTreeMap<TaskId, Task>,
    next_id: Option<TaskId>,
}

/// In-memory implementation of `TaskRepository`.
///
/// # Example
///
/// ```ignore
/// use infrastructure::in_memory::InMemoryTaskRepository;
///
/// let repository = InMemoryTaskRepository::new();
/// let task = repository.insert(&draft).await?;
/// let found = repository.find_by_id(task.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    table: Arc<RwLock<TaskTable>>,
}

impl InMemoryTaskRepository {
    /// Creates a new empty in-memory task repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(TaskTable {
                rows: BTreeMap::new(),
                next_id: Some(TaskId::FIRST),
            })),
        }
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(clippy::significant_drop_tightening)]
#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, draft: &TaskDraft) -> Result<Task, RepositoryError> {
        let mut table = self.table.write().await;
        let id = table
            .next_id
            .ok_or_else(|| RepositoryError::DatabaseError("task id sequence exhausted".into()))?;
        table.next_id = id.successor();

        let task = Task::from_draft(id, draft.clone());
        table.rows.insert(id, task.clone());
        drop(table);
        Ok(task)
    }

    async fn update(&self, id: TaskId, draft: &TaskDraft) -> Result<Option<Task>, RepositoryError> {
        let mut table = self.table.write().await;
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        *row = Task::from_draft(id, draft.clone());
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: TaskId) -> Result<u64, RepositoryError> {
        let mut table = self.table.write().await;
        Ok(u64::from(table.rows.remove(&id).is_some()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskStatus;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            description: "description".to_string(),
            status: TaskStatus::Pending,
            due_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_list_empty() {
        let repository = InMemoryTaskRepository::new();

        let tasks = repository.list().await.unwrap();

        assert!(tasks.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repository = InMemoryTaskRepository::new();

        let first = repository.insert(&draft("first")).await.unwrap();
        let second = repository.insert(&draft("second")).await.unwrap();

        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
        assert_eq!(repository.list().await.unwrap().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repository = InMemoryTaskRepository::new();

        let result = repository.find_by_id(TaskId::FIRST).await;

        assert_eq!(result, Ok(None));
    }

    #[rstest]
    #[tokio::test]
    async fn test_insert_and_find() {
        let repository = InMemoryTaskRepository::new();
        let inserted = repository.insert(&draft("Write docs")).await.unwrap();

        let found = repository.find_by_id(inserted.id).await.unwrap();

        assert_eq!(found, Some(inserted));
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let repository = InMemoryTaskRepository::new();
        let inserted = repository.insert(&draft("Old")).await.unwrap();
        let replacement = TaskDraft {
            title: "New".to_string(),
            description: "changed".to_string(),
            status: TaskStatus::Complete,
            due_date: Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap(),
        };

        let updated = repository
            .update(inserted.id, &replacement)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated, Task::from_draft(inserted.id, replacement));
        assert_eq!(
            repository.find_by_id(inserted.id).await.unwrap(),
            Some(updated)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let repository = InMemoryTaskRepository::new();

        let result = repository.update(TaskId::FIRST, &draft("x")).await;

        assert_eq!(result, Ok(None));
        assert!(repository.list().await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_delete_reports_affected_rows() {
        let repository = InMemoryTaskRepository::new();
        let inserted = repository.insert(&draft("Delete me")).await.unwrap();

        assert_eq!(repository.delete(inserted.id).await, Ok(1));
        assert_eq!(repository.delete(inserted.id).await, Ok(0));
    }

    #[rstest]
    #[tokio::test]
    async fn test_deleted_ids_are_not_reused() {
        let repository = InMemoryTaskRepository::new();
        let first = repository.insert(&draft("one")).await.unwrap();
        repository.delete(first.id).await.unwrap();

        let second = repository.insert(&draft("two")).await.unwrap();

        assert_ne!(first.id, second.id);
    }
}
