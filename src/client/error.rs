//! Client-side error type and failure-message normalization.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Fallback when a failed response has no readable body and no reason phrase.
pub const NETWORK_RESPONSE_NOT_OK: &str = "Network response was not ok";

/// Fallback when a JSON failure body carries no usable `error`.
pub const GENERIC_FAILURE: &str = "An error occurred";

/// Errors returned by `TaskClient`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Api {
        /// Response status.
        status: StatusCode,
        /// Human-readable message derived from the body.
        message: String,
    },

    /// The request never produced a readable response.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Returns the message a screen should display.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Transport(error) => error.to_string(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Turns a failed response into a single message.
///
/// Validation bodies become `field: message` pairs joined with `", "`, in
/// the order the server sent them.
#[must_use]
pub fn failure_message(status: StatusCode, body: &[u8]) -> String {
    let Ok(payload) = serde_json::from_slice::<Value>(body) else {
        return status
            .canonical_reason()
            .unwrap_or(NETWORK_RESPONSE_NOT_OK)
            .to_string();
    };

    let error = payload.get("error");
    if payload.get("type").and_then(Value::as_str) == Some("validation")
        && let Some(Value::Object(fields)) = error
    {
        return fields
            .iter()
            .map(|(field, message)| format!("{field}: {}", display_value(message)))
            .collect::<Vec<_>>()
            .join(", ");
    }

    match error {
        Some(value) if is_truthy(value) => display_value(value),
        _ => GENERIC_FAILURE.to_string(),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain_error(StatusCode::NOT_FOUND, r#"{"error":"Task not found"}"#, "Task not found")]
    #[case::validation(
        StatusCode::BAD_REQUEST,
        r#"{"error":{"title":"Too small","status":"Invalid option"},"type":"validation"}"#,
        "title: Too small, status: Invalid option"
    )]
    #[case::structured_error(StatusCode::BAD_REQUEST, r#"{"error":{"code":7}}"#, r#"{"code":7}"#)]
    #[case::numeric_error(StatusCode::BAD_REQUEST, r#"{"error":42}"#, "42")]
    #[case::empty_error(StatusCode::BAD_REQUEST, r#"{"error":""}"#, "An error occurred")]
    #[case::false_error(StatusCode::BAD_REQUEST, r#"{"error":false}"#, "An error occurred")]
    #[case::no_error_key(StatusCode::INTERNAL_SERVER_ERROR, r#"{"detail":"x"}"#, "An error occurred")]
    #[case::not_json(StatusCode::BAD_GATEWAY, "<html>oops</html>", "Bad Gateway")]
    fn test_failure_message(#[case] status: StatusCode, #[case] body: &str, #[case] expected: &str) {
        assert_eq!(failure_message(status, body.as_bytes()), expected);
    }

    #[rstest]
    fn test_failure_message_without_reason_phrase() {
        let status = StatusCode::from_u16(599).unwrap();

        assert_eq!(failure_message(status, b""), NETWORK_RESPONSE_NOT_OK);
    }

    #[rstest]
    fn test_validation_type_with_string_error_is_verbatim() {
        let body = br#"{"error":"Bad input","type":"validation"}"#;

        assert_eq!(failure_message(StatusCode::BAD_REQUEST, body), "Bad input");
    }

    #[rstest]
    fn test_api_error_accessors() {
        let error = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Task not found".to_string(),
        };

        assert!(error.is_not_found());
        assert_eq!(error.message(), "Task not found");
        assert_eq!(error.to_string(), "Task not found");
    }
}
