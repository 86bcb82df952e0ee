//! Screen view models for the task manager front end.
//!
//! Each screen keeps its own state and talks to the API through a
//! [`TaskGateway`]. Actions that leave a screen return a [`Navigation`];
//! rendering is left to whatever front end drives these models.

pub mod create;
pub mod edit;
pub mod form;
pub mod list;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;

pub use create::CreateView;
pub use edit::{EditScreen, EditView};
pub use form::TaskForm;
pub use list::{ListView, TaskCard};
pub use routes::Route;

use crate::api::TaskResponse;
use crate::client::{ClientError, TaskClient, TaskPayload};

/// Prompt shown before a task is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// Remote task operations used by the screens.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<TaskResponse>, ClientError>;

    async fn get_task(&self, id: &str) -> Result<TaskResponse, ClientError>;

    async fn create_task(&self, payload: &TaskPayload) -> Result<TaskResponse, ClientError>;

    async fn update_task(
        &self,
        id: &str,
        payload: &TaskPayload,
    ) -> Result<TaskResponse, ClientError>;

    async fn delete_task(&self, id: &str) -> Result<(), ClientError>;
}

#[async_trait]
impl TaskGateway for TaskClient {
    async fn list_tasks(&self) -> Result<Vec<TaskResponse>, ClientError> {
        Self::list_tasks(self).await
    }

    async fn get_task(&self, id: &str) -> Result<TaskResponse, ClientError> {
        Self::get_task(self, id).await
    }

    async fn create_task(&self, payload: &TaskPayload) -> Result<TaskResponse, ClientError> {
        Self::create_task(self, payload).await
    }

    async fn update_task(
        &self,
        id: &str,
        payload: &TaskPayload,
    ) -> Result<TaskResponse, ClientError> {
        Self::update_task(self, id, payload).await
    }

    async fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        Self::delete_task(self, id).await
    }
}

/// Shared handle to a gateway.
pub type SharedGateway = Arc<dyn TaskGateway>;

/// Yes/no confirmation before destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Where the front end should go after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    To(Route),
}
