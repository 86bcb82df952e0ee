//! API error handling.
//!
//! This module provides the error bodies returned by the API and the field
//! validation error collected by the DTO layer.
//!
//! Wire shapes:
//!
//! ```json
//! { "error": "Task not found" }
//! { "error": { "title": "Too small: expected string to have >=1 characters" }, "type": "validation" }
//! { "error": "Internal server error" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::infrastructure::RepositoryError;

/// Message returned with every 404.
pub const TASK_NOT_FOUND: &str = "Task not found";

/// Message returned with every 500.
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level error for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the field that failed validation.
    pub field: String,
    /// Message of the first rule the field violated.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validation failure holding at most one message per field.
///
/// Serializes as a JSON object keyed by field name, in the order the fields
/// were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    /// Field-level errors.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub const fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Creates a validation error with a single field error.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, message)])
    }

    /// Records `message` for `field` unless the field already has one.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        if self.message_for(&field).is_none() {
            self.errors.push(FieldError::new(field, message));
        }
    }

    /// Returns the message recorded for `field`, if any.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for error in &self.errors {
            map.serialize_entry(&error.field, &error.message)?;
        }
        map.end()
    }
}

// =============================================================================
// API Error Response
// =============================================================================

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// `{"error": "<message>"}`
    Message {
        /// Human-readable message.
        error: String,
    },
    /// `{"error": {<field>: <message>}, "type": "validation"}`
    Validation {
        /// Per-field messages.
        error: ValidationError,
        /// Always `"validation"`.
        #[serde(rename = "type")]
        kind: &'static str,
    },
}

/// API error response containing status code and error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error body.
    pub body: ErrorBody,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(status: StatusCode, body: ErrorBody) -> Self {
        Self { status, body }
    }

    /// Creates a 400 Bad Request response for validation errors.
    #[must_use]
    pub fn validation(error: ValidationError) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorBody::Validation {
                error,
                kind: "validation",
            },
        )
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            ErrorBody::Message {
                error: message.into(),
            },
        )
    }

    /// Creates the 404 returned for an absent task.
    #[must_use]
    pub fn task_not_found() -> Self {
        Self::not_found(TASK_NOT_FOUND)
    }

    /// Creates a 500 Internal Server Error response. Carries no detail.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::Message {
                error: INTERNAL_SERVER_ERROR.to_string(),
            },
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<RepositoryError> for ApiErrorResponse {
    fn from(error: RepositoryError) -> Self {
        // Internal errors should not expose details to clients.
        tracing::error!(%error, "Repository operation failed");
        Self::internal_error()
    }
}

impl From<ValidationError> for ApiErrorResponse {
    fn from(error: ValidationError) -> Self {
        Self::validation(error)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn test_validation_error_keeps_first_message_per_field() {
        let mut error = ValidationError::default();
        error.push("title", "first");
        error.push("title", "second");
        error.push("status", "bad status");

        assert_eq!(error.errors.len(), 2);
        assert_eq!(error.message_for("title"), Some("first"));
        assert_eq!(error.message_for("status"), Some("bad status"));
        assert_eq!(error.message_for("dueDate"), None);
    }

    #[rstest]
    fn test_validation_error_serializes_as_ordered_map() {
        let mut error = ValidationError::default();
        error.push("title", "a");
        error.push("description", "b");

        let text = serde_json::to_string(&error).unwrap();

        assert_eq!(text, r#"{"title":"a","description":"b"}"#);
    }

    #[rstest]
    fn test_validation_response_shape() {
        let response = ApiErrorResponse::validation(ValidationError::single("title", "Required"));

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(&response.body).unwrap(),
            json!({"error": {"title": "Required"}, "type": "validation"})
        );
    }

    #[rstest]
    fn test_task_not_found_shape() {
        let response = ApiErrorResponse::task_not_found();

        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(
            serde_json::to_value(&response.body).unwrap(),
            json!({"error": "Task not found"})
        );
    }

    #[rstest]
    fn test_repository_error_hides_detail() {
        let error = RepositoryError::DatabaseError("password authentication failed".to_string());

        let response: ApiErrorResponse = error.into();

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(&response.body).unwrap(),
            json!({"error": "Internal server error"})
        );
    }

    #[rstest]
    fn test_validation_error_to_api_error_response() {
        let error = ValidationError::single("id", "Too small: expected number to be >=1");

        let response: ApiErrorResponse = error.into();

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}
