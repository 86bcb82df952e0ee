//! Route table and middleware stack.

use std::any::Any;

use axum::{
    Router,
    http::{HeaderValue, Method, header, request::Parts},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiErrorResponse;
use super::handlers::{
    AppState, create_task, delete_task, get_task, health_check, list_tasks, update_task,
};

/// Collection path.
pub const TASKS_PATH: &str = "/api/tasks";

/// Single-task path.
pub const TASK_PATH: &str = "/api/tasks/{id}";

const LOCAL_ORIGIN_PREFIX: &[u8] = b"http://localhost:";

/// Builds the application router with its middleware.
///
/// CORS admits any `http://localhost:<port>` origin with credentials.
/// Panics inside a handler become a JSON 500.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(TASKS_PATH, get(list_tasks).post(create_task))
        .route(
            TASK_PATH,
            get(get_task).put(update_task).delete(delete_task),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(is_local_origin))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

fn is_local_origin(origin: &HeaderValue, _request: &Parts) -> bool {
    origin.as_bytes().starts_with(LOCAL_ORIGIN_PREFIX)
}

#[allow(clippy::needless_pass_by_value)]
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(detail, "Handler panicked");

    ApiErrorResponse::internal_error().into_response()
}
