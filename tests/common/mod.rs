//! Common test helpers for integration tests.
//!
//! This module provides shared utilities for building an in-memory
//! application, driving it through `tower::ServiceExt::oneshot`, and serving
//! it on an ephemeral port for client tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate; helpers used by only one test
//! file would otherwise warn in the others.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

use task_manager_api::api::{AppState, build_router};
use task_manager_api::domain::{Task, TaskDraft, TaskId};
use task_manager_api::infrastructure::{InMemoryTaskRepository, RepositoryError, TaskRepository};

// =============================================================================
// Application Helpers
// =============================================================================

/// Creates a test `AppState` backed by an empty in-memory repository.
pub fn create_test_app_state() -> AppState {
    AppState::new(Arc::new(InMemoryTaskRepository::new()))
}

/// Creates the full router, middleware included, over fresh state.
pub fn create_test_router() -> Router {
    build_router(create_test_app_state())
}

/// Repository whose every call fails as an unreachable database would.
pub struct FailingRepository;

impl FailingRepository {
    fn error() -> RepositoryError {
        RepositoryError::DatabaseError("connection refused: tasks-db:5432".to_string())
    }
}

#[async_trait]
impl TaskRepository for FailingRepository {
    async fn list(&self) -> Result<Vec<Task>, RepositoryError> {
        Err(Self::error())
    }

    async fn find_by_id(&self, _id: TaskId) -> Result<Option<Task>, RepositoryError> {
        Err(Self::error())
    }

    async fn insert(&self, _draft: &TaskDraft) -> Result<Task, RepositoryError> {
        Err(Self::error())
    }

    async fn update(&self, _id: TaskId, _draft: &TaskDraft) -> Result<Option<Task>, RepositoryError> {
        Err(Self::error())
    }

    async fn delete(&self, _id: TaskId) -> Result<u64, RepositoryError> {
        Err(Self::error())
    }
}

/// Creates the full router over a repository that always fails.
pub fn create_failing_router() -> Router {
    build_router(AppState::new(Arc::new(FailingRepository)))
}

/// Serves a fresh application on `127.0.0.1:0` and returns the tasks URL.
pub async fn spawn_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let router = create_test_router();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{address}/api/tasks")
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Sends one request through the router and decodes the JSON response.
///
/// An empty response body decodes to `Value::Null`.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(router, request).await
}

/// Sends a prepared request and decodes the JSON response.
pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

// =============================================================================
// Test Data
// =============================================================================

/// The canonical valid create body.
pub fn buy_milk() -> Value {
    json!({
        "title": "Buy milk",
        "description": "2%",
        "status": "pending",
        "dueDate": "2025-01-01"
    })
}

/// `buy_milk` with one field replaced.
pub fn buy_milk_with(field: &str, value: Value) -> Value {
    let mut body = buy_milk();
    body[field] = value;
    body
}

/// Creates a task through the API and returns its id.
pub async fn create_task(router: &Router, body: Value) -> i64 {
    let (status, created) = send(router, Method::POST, "/api/tasks", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {created}");
    created["id"].as_i64().unwrap()
}
