//! Domain module for task management.
//!
//! This module contains the task model and its value objects.

pub mod task;

pub use task::{Task, TaskDraft, TaskId, TaskStatus, UnknownStatus};
