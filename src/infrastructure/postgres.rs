//! `PostgreSQL` repository implementation.
//!
//! This module provides the `PostgreSQL`-backed `TaskRepository` using `sqlx`.
//! Each repository call issues a single statement; no explicit transactions
//! are opened.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TYPE status AS ENUM ('pending', 'in_progress', 'complete');
//!
//! CREATE TABLE tasks (
//!     id SERIAL PRIMARY KEY,
//!     title TEXT NOT NULL,
//!     description TEXT NOT NULL,
//!     status status NOT NULL,
//!     due_date TIMESTAMP NOT NULL
//! );
//! ```

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::domain::{Task, TaskDraft, TaskId, TaskStatus};
use crate::infrastructure::{RepositoryError, TaskRepository};

/// Idempotent DDL creating the status enum and the tasks table.
const SCHEMA: &str = "\
DO $$ BEGIN
    CREATE TYPE status AS ENUM ('pending', 'in_progress', 'complete');
EXCEPTION WHEN duplicate_object THEN NULL;
END $$;

CREATE TABLE IF NOT EXISTS tasks (
    id SERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    status status NOT NULL,
    due_date TIMESTAMP NOT NULL
);";

const RETURNED_COLUMNS: &str = "id, title, description, status::text AS status, due_date";

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw row as read from the `tasks` table.
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i32,
    title: String,
    description: String,
    status: String,
    due_date: NaiveDateTime,
}

impl TryFrom<TaskRow> for Task {
    type Error = RepositoryError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let id = TaskId::new(row.id)
            .ok_or_else(|| RepositoryError::CorruptRow(format!("non-positive id {}", row.id)))?;
        let status: TaskStatus = row
            .status
            .parse()
            .map_err(|error: crate::domain::UnknownStatus| {
                RepositoryError::CorruptRow(error.to_string())
            })?;

        Ok(Self {
            id,
            title: row.title,
            description: row.description,
            status,
            due_date: row.due_date.and_utc(),
        })
    }
}

// =============================================================================
// PostgreSQL Task Repository
// =============================================================================

/// `PostgreSQL` implementation of `TaskRepository`.
///
/// # Example
///
/// ```ignore
/// use infrastructure::postgres::PostgresTaskRepository;
///
/// let pool = PgPool::connect("postgres://localhost/tasks").await?;
/// let repository = PostgresTaskRepository::new(pool);
/// repository.ensure_schema().await?;
///
/// let task = repository.insert(&draft).await?;
/// let found = repository.find_by_id(task.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    /// Connection pool for `PostgreSQL`.
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new `PostgreSQL` task repository with the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the status enum and the tasks table if they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DatabaseError` if the DDL fails.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, RepositoryError> {
        let rows: Vec<TaskRow> =
            sqlx::query_as(&format!("SELECT {RETURNED_COLUMNS} FROM tasks ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn find_by_id(&self, id: TaskId) -> Result<Option<Task>, RepositoryError> {
        let row: Option<TaskRow> =
            sqlx::query_as(&format!("SELECT {RETURNED_COLUMNS} FROM tasks WHERE id = $1"))
                .bind(id.get())
                .fetch_optional(&self.pool)
                .await?;

        row.map(Task::try_from).transpose()
    }

    async fn insert(&self, draft: &TaskDraft) -> Result<Task, RepositoryError> {
        let row: TaskRow = sqlx::query_as(&format!(
            "INSERT INTO tasks (title, description, status, due_date) \
             VALUES ($1, $2, $3::status, $4) \
             RETURNING {RETURNED_COLUMNS}"
        ))
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.status.as_str())
        .bind(draft.due_date.naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Task::try_from(row)
    }

    async fn update(&self, id: TaskId, draft: &TaskDraft) -> Result<Option<Task>, RepositoryError> {
        let row: Option<TaskRow> = sqlx::query_as(&format!(
            "UPDATE tasks \
             SET title = $1, description = $2, status = $3::status, due_date = $4 \
             WHERE id = $5 \
             RETURNING {RETURNED_COLUMNS}"
        ))
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.status.as_str())
        .bind(draft.due_date.naive_utc())
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Task::try_from).transpose()
    }

    async fn delete(&self, id: TaskId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Tests
// =============================================================================
