//! Task detail / edit screen.

use crate::api::TaskResponse;

use super::{Confirm, DELETE_PROMPT, Navigation, Route, SharedGateway, TaskForm};

/// What the detail screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditScreen {
    Loading,
    /// Loading failed for a reason other than 404.
    Failed(String),
    NotFound,
    /// The task was loaded and its form is editable.
    Ready(TaskResponse),
}

/// State of the `/tasks/{id}` screen.
pub struct EditView {
    gateway: SharedGateway,
    id: String,
    screen: EditScreen,
    /// Form inputs, populated by [`EditView::load`].
    pub form: Option<TaskForm>,
    saving: bool,
    error: Option<String>,
}

impl EditView {
    /// `id` is the raw route segment.
    #[must_use]
    pub fn new(gateway: SharedGateway, id: impl Into<String>) -> Self {
        Self {
            gateway,
            id: id.into(),
            screen: EditScreen::Loading,
            form: None,
            saving: false,
            error: None,
        }
    }

    /// Fetches the task and pre-populates the form.
    pub async fn load(&mut self) {
        self.screen = match self.gateway.get_task(&self.id).await {
            Ok(task) => {
                self.form = Some(TaskForm::from_task(&task));
                EditScreen::Ready(task)
            }
            Err(error) if error.is_not_found() => EditScreen::NotFound,
            Err(error) => EditScreen::Failed(error.message()),
        };
    }

    /// Saves the form and returns to the list.
    pub async fn submit(&mut self) -> Navigation {
        let Some(form) = &self.form else {
            return Navigation::Stay;
        };

        self.saving = true;
        self.error = None;

        match self.gateway.update_task(&self.id, &form.to_payload()).await {
            Ok(_) => Navigation::To(Route::List),
            Err(error) => {
                self.error = Some(error.message());
                self.saving = false;
                Navigation::Stay
            }
        }
    }

    /// Deletes the task after confirmation and returns to the list.
    pub async fn delete(&mut self, confirm: &dyn Confirm) -> Navigation {
        if !confirm.confirm(DELETE_PROMPT) {
            return Navigation::Stay;
        }

        match self.gateway.delete_task(&self.id).await {
            Ok(()) => Navigation::To(Route::List),
            Err(error) => {
                self.error = Some(format!("Failed to delete task: {}", error.message()));
                Navigation::Stay
            }
        }
    }

    #[must_use]
    pub const fn screen(&self) -> &EditScreen {
        &self.screen
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
