//! HTTP client for the task API.
//!
//! Every non-success response is normalized into `ClientError::Api` with a
//! single display message; see [`failure_message`].

pub mod error;

use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};

pub use error::{ClientError, failure_message};

use crate::api::TaskResponse;
use crate::domain::TaskStatus;

/// Base URL used when `TASKS_API_URL` is unset.
pub const DEFAULT_TASKS_API_URL: &str = "http://localhost:3000/api/tasks";

/// Task fields as entered in a form. The server validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// Date as typed, usually `YYYY-MM-DD`.
    pub due_date: String,
}

/// Client for the `/api/tasks` resource.
///
/// # Example
///
/// ```ignore
/// let client = TaskClient::new("http://localhost:3000/api/tasks");
/// let created = client.create_task(&payload).await?;
/// let tasks = client.list_tasks().await?;
/// ```
#[derive(Debug, Clone)]
pub struct TaskClient {
    http: reqwest::Client,
    base_url: String,
}

impl TaskClient {
    /// Creates a client for `base_url` (the collection URL).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client that reuses an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Reads `TASKS_API_URL`, falling back to [`DEFAULT_TASKS_API_URL`].
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("TASKS_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TASKS_API_URL.to_string());
        Self::new(base_url)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/{id}", self.base_url)
    }

    /// Fetches every task.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport failure or a non-success status.
    pub async fn list_tasks(&self) -> Result<Vec<TaskResponse>, ClientError> {
        let response = send(self.http.get(&self.base_url)).await?;
        Ok(response.json().await?)
    }

    /// Fetches one task. `id` is sent as given.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport failure or a non-success status.
    pub async fn get_task(&self, id: &str) -> Result<TaskResponse, ClientError> {
        let response = send(self.http.get(self.task_url(id))).await?;
        Ok(response.json().await?)
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport failure or a non-success status.
    pub async fn create_task(&self, payload: &TaskPayload) -> Result<TaskResponse, ClientError> {
        let response = send(self.http.post(&self.base_url).json(payload)).await?;
        Ok(response.json().await?)
    }

    /// Replaces a task.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport failure or a non-success status.
    pub async fn update_task(
        &self,
        id: &str,
        payload: &TaskPayload,
    ) -> Result<TaskResponse, ClientError> {
        let response = send(self.http.put(self.task_url(id)).json(payload)).await?;
        Ok(response.json().await?)
    }

    /// Deletes a task. The response body is discarded.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport failure or a non-success status.
    pub async fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        send(self.http.delete(self.task_url(id))).await?;
        Ok(())
    }
}

async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await?;
    let message = failure_message(status, &body);
    tracing::debug!(%status, %message, "Task API request failed");
    Err(ClientError::Api { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:3000/api/tasks", "http://localhost:3000/api/tasks/7")]
    #[case("http://localhost:3000/api/tasks/", "http://localhost:3000/api/tasks/7")]
    fn test_task_url(#[case] base_url: &str, #[case] expected: &str) {
        let client = TaskClient::new(base_url);

        assert_eq!(client.task_url("7"), expected);
    }

    #[rstest]
    fn test_payload_wire_shape() {
        let payload = TaskPayload {
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            status: TaskStatus::InProgress,
            due_date: "2025-01-01".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "title": "Buy milk",
                "description": "2%",
                "status": "in_progress",
                "dueDate": "2025-01-01"
            })
        );
    }
}
