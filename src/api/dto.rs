//! Data Transfer Objects for API requests and responses.
//!
//! This module contains DTOs that are separate from the storage rows,
//! together with the validation that turns raw JSON into them.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::error::ValidationError;
use crate::domain::{Task, TaskDraft, TaskId, TaskStatus};

/// Maximum length of `title` and `description`, in code points.
pub const MAX_TEXT_LENGTH: usize = 255;

// =============================================================================
// Task DTOs
// =============================================================================

/// Request DTO for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    /// Title of the task.
    pub title: String,
    /// Description of the task.
    pub description: String,
    /// Initial status.
    pub status: TaskStatus,
    /// Due date.
    pub due_date: DateTime<Utc>,
}

/// Request DTO for replacing a task. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    /// New title.
    pub title: String,
    /// New description.
    pub description: String,
    /// New status. Any transition is allowed.
    pub status: TaskStatus,
    /// New due date.
    pub due_date: DateTime<Utc>,
}

impl CreateTaskRequest {
    /// Validates a raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` with one message per offending field.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        validate_task_body(body).map(|draft| Self {
            title: draft.title,
            description: draft.description,
            status: draft.status,
            due_date: draft.due_date,
        })
    }

    /// Converts the request into the fields handed to storage.
    #[must_use]
    pub fn into_draft(self) -> TaskDraft {
        TaskDraft {
            title: self.title,
            description: self.description,
            status: self.status,
            due_date: self.due_date,
        }
    }
}

impl UpdateTaskRequest {
    /// Validates a raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` with one message per offending field.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        validate_task_body(body).map(|draft| Self {
            title: draft.title,
            description: draft.description,
            status: draft.status,
            due_date: draft.due_date,
        })
    }

    /// Converts the request into the fields handed to storage.
    #[must_use]
    pub fn into_draft(self) -> TaskDraft {
        TaskDraft {
            title: self.title,
            description: self.description,
            status: self.status,
            due_date: self.due_date,
        }
    }
}

/// Validated `{id}` path parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskIdParam(pub TaskId);

impl FromStr for TaskIdParam {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_task_id(raw).map(Self)
    }
}

/// Response DTO for a task.
///
/// Only these five fields ever leave the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task ID.
    pub id: TaskId,
    /// Title of the task.
    pub title: String,
    /// Description of the task.
    pub description: String,
    /// Current status.
    pub status: TaskStatus,
    /// Due date, rendered as RFC 3339 UTC with milliseconds.
    #[serde(serialize_with = "serialize_timestamp")]
    pub due_date: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            due_date: task.due_date,
        }
    }
}

/// Response DTO for a deleted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedTaskResponse {
    /// ID of the removed task.
    pub id: TaskId,
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// =============================================================================
// Validation
// =============================================================================

/// Validates the four task fields of a JSON body.
///
/// Fields are checked in the order `title`, `description`, `status`,
/// `dueDate`; each offending field contributes its first failing message.
///
/// # Errors
///
/// Returns `ValidationError` if the body is not an object or any field is
/// invalid.
pub fn validate_task_body(body: &Value) -> Result<TaskDraft, ValidationError> {
    let Some(object) = body.as_object() else {
        return Err(ValidationError::single(
            "body",
            format!("Invalid input: expected object, received {}", received(Some(body))),
        ));
    };

    let mut errors = ValidationError::default();
    let title = validate_text(object.get("title"))
        .map_err(|message| errors.push("title", message))
        .ok();
    let description = validate_text(object.get("description"))
        .map_err(|message| errors.push("description", message))
        .ok();
    let status = validate_status(object.get("status"))
        .map_err(|message| errors.push("status", message))
        .ok();
    let due_date = coerce_date(object.get("dueDate"))
        .map_err(|message| errors.push("dueDate", message))
        .ok();

    match (title, description, status, due_date) {
        (Some(title), Some(description), Some(status), Some(due_date)) => Ok(TaskDraft {
            title,
            description,
            status,
            due_date,
        }),
        _ => Err(errors),
    }
}

/// Validates a required text field of 1 to 255 code points.
///
/// The value is not trimmed.
///
/// # Errors
///
/// Returns the message of the first violated rule.
pub fn validate_text(value: Option<&Value>) -> Result<String, String> {
    let Some(Value::String(text)) = value else {
        return Err(format!(
            "Invalid input: expected string, received {}",
            received(value)
        ));
    };

    let length = text.chars().count();
    if length < 1 {
        return Err("Too small: expected string to have >=1 characters".to_string());
    }
    if length > MAX_TEXT_LENGTH {
        return Err(format!(
            "Too big: expected string to have <={MAX_TEXT_LENGTH} characters"
        ));
    }

    Ok(text.clone())
}

/// Validates a status literal.
///
/// # Errors
///
/// Returns the message listing the accepted literals.
pub fn validate_status(value: Option<&Value>) -> Result<TaskStatus, String> {
    value
        .and_then(Value::as_str)
        .and_then(|literal| literal.parse().ok())
        .ok_or_else(|| {
            let options: Vec<String> = TaskStatus::ALL
                .iter()
                .map(|status| format!("\"{}\"", status.as_str()))
                .collect();
            format!("Invalid option: expected one of {}", options.join("|"))
        })
}

/// Coerces a due date from a string or an epoch-milliseconds number.
///
/// Accepted strings: RFC 3339, `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and
/// `YYYY-MM-DD` (UTC midnight).
///
/// # Errors
///
/// Returns a message naming the received JSON type.
pub fn coerce_date(value: Option<&Value>) -> Result<DateTime<Utc>, String> {
    let coerced = match value {
        Some(Value::String(text)) => parse_date_string(text.trim()),
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral_millis))
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    };

    coerced.ok_or_else(|| format!("Invalid input: expected date, received {}", received(value)))
}

/// Float epoch millis, accepted only when integral.
#[allow(clippy::cast_possible_truncation)]
fn integral_millis(value: f64) -> Option<i64> {
    let in_range = value.is_finite() && value.abs() < 9_007_199_254_740_992.0;
    (in_range && value.fract() == 0.0).then_some(value as i64)
}

/// Local date-time layouts, read as UTC.
const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

fn parse_date_string(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parses the raw `{id}` path segment into a positive task ID.
///
/// # Errors
///
/// Returns `ValidationError` keyed by `id`.
pub fn parse_task_id(raw: &str) -> Result<TaskId, ValidationError> {
    let trimmed = raw.trim();
    let message = match trimmed.parse::<f64>() {
        Ok(value) if !value.is_finite() => {
            "Invalid input: expected number, received NaN".to_string()
        }
        Ok(value) if value.fract() != 0.0 => {
            "Invalid input: expected int, received number".to_string()
        }
        Ok(value) if value < 1.0 => "Too small: expected number to be >=1".to_string(),
        Ok(value) if value > f64::from(i32::MAX) => {
            format!("Too big: expected number to be <={}", i32::MAX)
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(value) => match TaskId::new(value as i32) {
            Some(id) => return Ok(id),
            None => "Too small: expected number to be >=1".to_string(),
        },
        Err(_) => "Invalid input: expected number, received NaN".to_string(),
    };

    Err(ValidationError::single("id", message))
}

/// Names the JSON type of a value the way error messages report it.
const fn received(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

// =============================================================================
// Tests
// =============================================================================
