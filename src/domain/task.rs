//! Task domain model.
//!
//! A task is the only persisted entity. Its identifier is assigned by storage
//! when the row is inserted; every other field is supplied by the caller and
//! replaced as a whole on update.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a task.
///
/// Always positive. Values are generated by the storage layer, never by
/// clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct TaskId(i32);

impl TaskId {
    /// The first identifier handed out by a fresh sequence.
    pub const FIRST: Self = Self(1);

    /// Creates a `TaskId` if `value` is positive.
    #[must_use]
    pub const fn new(value: i32) -> Option<Self> {
        if value >= 1 { Some(Self(value)) } else { None }
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Returns the next identifier in sequence, or `None` on overflow.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl TryFrom<i32> for TaskId {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("task id must be positive, got {value}"))
    }
}

impl From<TaskId> for i32 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

// =============================================================================
// Enums
// =============================================================================

/// The status of a task.
///
/// Any status may change to any other; no transition order is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has not been started yet.
    #[default]
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task is done.
    Complete,
}

impl TaskStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Complete];

    /// Returns the wire and database literal for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Complete => "complete",
        }
    }

    /// Returns a human-readable label (`in progress` rather than `in_progress`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error returned when parsing a status literal that is not one of the three
/// known values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

// =============================================================================
// Task
// =============================================================================

/// The caller-supplied fields of a task.
///
/// Used for both inserts and updates: an update always replaces all four
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title, 1 to 255 code points.
    pub title: String,
    /// Description, 1 to 255 code points.
    pub description: String,
    /// Current status.
    pub status: TaskStatus,
    /// Due date. Past dates are allowed.
    pub due_date: DateTime<Utc>,
}

/// A stored task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Storage-assigned identifier.
    pub id: TaskId,
    /// Title of the task.
    pub title: String,
    /// Description of the task.
    pub description: String,
    /// Current status.
    pub status: TaskStatus,
    /// Due date.
    pub due_date: DateTime<Utc>,
}

impl Task {
    /// Builds a stored row from an identifier and a draft.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            due_date: draft.due_date,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
