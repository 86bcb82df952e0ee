//! Task list screen.

use crate::api::TaskResponse;
use crate::domain::{TaskId, TaskStatus};

use super::{Confirm, DELETE_PROMPT, Route, SharedGateway};

/// One rendered row of the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Status with underscores shown as spaces, e.g. `in progress`.
    pub status_label: String,
    /// `YYYY-MM-DD`.
    pub due_label: String,
    /// Detail screen for this task.
    pub link: Route,
}

impl From<&TaskResponse> for TaskCard {
    fn from(task: &TaskResponse) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            status_label: task.status.label().to_string(),
            due_label: task.due_date.format("%Y-%m-%d").to_string(),
            link: Route::TaskDetail(task.id.to_string()),
        }
    }
}

/// State of the `/` screen.
pub struct ListView {
    gateway: SharedGateway,
    tasks: Vec<TaskResponse>,
    loading: bool,
    error: Option<String>,
    alert: Option<String>,
}

impl ListView {
    /// Starts in the loading state; call [`ListView::load`] next.
    #[must_use]
    pub fn new(gateway: SharedGateway) -> Self {
        Self {
            gateway,
            tasks: Vec::new(),
            loading: true,
            error: None,
            alert: None,
        }
    }

    /// Fetches all tasks, replacing local state.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.gateway.list_tasks().await {
            Ok(tasks) => self.tasks = tasks,
            Err(error) => self.error = Some(error.message()),
        }
        self.loading = false;
    }

    /// Deletes a task after confirmation and drops it locally without
    /// reloading. Returns whether the task was removed.
    pub async fn delete(&mut self, id: TaskId, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(DELETE_PROMPT) {
            return false;
        }

        match self.gateway.delete_task(&id.to_string()).await {
            Ok(()) => {
                self.tasks.retain(|task| task.id != id);
                true
            }
            Err(error) => {
                self.alert = Some(format!("Failed to delete task: {}", error.message()));
                false
            }
        }
    }

    #[must_use]
    pub fn cards(&self) -> Vec<TaskCard> {
        self.tasks.iter().map(TaskCard::from).collect()
    }

    #[must_use]
    pub fn tasks(&self) -> &[TaskResponse] {
        &self.tasks
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Pending alert, cleared once taken.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// True once loaded with nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.loading && self.error.is_none() && self.tasks.is_empty()
    }
}
