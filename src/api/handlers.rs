//! HTTP handlers for the task endpoints.
//!
//! Handlers validate the path and body first, then delegate to
//! `TaskService`. Responses carry only the five public task fields.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use serde::Serialize;
use serde_json::Value;

use super::dto::{
    CreateTaskRequest, DeletedTaskResponse, TaskIdParam, TaskResponse, UpdateTaskRequest,
};
use super::error::{ApiErrorResponse, ValidationError};
use crate::domain::TaskId;
use crate::infrastructure::TaskRepository;
use crate::service::TaskService;

// =============================================================================
// Application State
// =============================================================================

/// Application state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Task service backed by the configured repository.
    pub task_service: TaskService,
}

impl AppState {
    /// Creates a new `AppState` around an initialized repository.
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository + Send + Sync>) -> Self {
        Self {
            task_service: TaskService::new(repository),
        }
    }
}

/// Unwraps a JSON body, reporting unreadable input under the `body` key.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiErrorResponse> {
    body.map(|Json(value)| value).map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected request body");
        ApiErrorResponse::validation(ValidationError::single("body", rejection.body_text()))
    })
}

/// Parses the `{id}` segment, reporting undecodable paths as a non-numeric ID.
fn path_id(id: Result<Path<String>, PathRejection>) -> Result<TaskId, ApiErrorResponse> {
    let Path(raw) = id.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected task id path segment");
        ApiErrorResponse::validation(ValidationError::single(
            "id",
            "Invalid input: expected number, received NaN",
        ))
    })?;
    let TaskIdParam(id) = raw.parse()?;
    Ok(id)
}

// =============================================================================
// Task Handlers
// =============================================================================

/// Lists all tasks.
///
/// # Endpoint
///
/// `GET /api/tasks`
///
/// # Errors
///
/// Returns 500 if storage fails.
pub async fn list_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<TaskResponse>>, ApiErrorResponse> {
    let tasks = state.task_service.list().await?;
    Ok(Json(tasks))
}

/// Returns a single task.
///
/// # Endpoint
///
/// `GET /api/tasks/{id}`
///
/// # Errors
///
/// * 400 for a malformed ID
/// * 404 if no task has the ID
/// * 500 if storage fails
pub async fn get_task(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let id = path_id(id)?;

    state
        .task_service
        .get_by_id(id)
        .await?
        .ok_or_else(ApiErrorResponse::task_not_found)
        .map(Json)
}

/// Creates a task.
///
/// # Endpoint
///
/// `POST /api/tasks`
///
/// Responds with 200 and the stored task, including its generated ID.
///
/// # Errors
///
/// * 400 with per-field messages if the body is invalid
/// * 500 if storage fails
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let request = CreateTaskRequest::from_json(&json_body(body)?)?;

    let task = state.task_service.create(request).await?;

    Ok(Json(task))
}

/// Replaces every field of a task.
///
/// # Endpoint
///
/// `PUT /api/tasks/{id}`
///
/// The ID is validated before the body.
///
/// # Errors
///
/// * 400 for a malformed ID or body
/// * 404 if no task has the ID
/// * 500 if storage fails
pub async fn update_task(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiErrorResponse> {
    let id = path_id(id)?;
    let request = UpdateTaskRequest::from_json(&json_body(body)?)?;

    state
        .task_service
        .update(id, request)
        .await?
        .ok_or_else(ApiErrorResponse::task_not_found)
        .map(Json)
}

/// Deletes a task.
///
/// # Endpoint
///
/// `DELETE /api/tasks/{id}`
///
/// # Errors
///
/// * 400 for a malformed ID
/// * 404 if no task has the ID
/// * 500 if storage fails
pub async fn delete_task(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<DeletedTaskResponse>, ApiErrorResponse> {
    let id = path_id(id)?;

    state
        .task_service
        .delete(id)
        .await?
        .ok_or_else(ApiErrorResponse::task_not_found)
        .map(Json)
}

// =============================================================================
// Health Check
// =============================================================================

/// Response for health check endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Health check endpoint.
///
/// Does not touch storage.
///
/// # Endpoint
///
/// `GET /health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Tests
// =============================================================================
