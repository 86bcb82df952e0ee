//! API module for HTTP handlers.
//!
//! This module contains route definitions and request/response handlers.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;

pub use dto::{CreateTaskRequest, DeletedTaskResponse, TaskResponse, UpdateTaskRequest};
pub use error::{ApiErrorResponse, ErrorBody, FieldError, ValidationError};
pub use handlers::{
    AppState, HealthResponse, create_task, delete_task, get_task, health_check, list_tasks,
    update_task,
};
pub use router::{TASK_PATH, TASKS_PATH, build_router};
