//! New task screen.

use super::{Navigation, Route, SharedGateway, TaskForm};

/// Message shown when the due date input is empty.
pub const DUE_DATE_REQUIRED: &str = "Due date is required";

/// Message shown when a failure carries no text.
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong";

/// State of the `/new` screen.
pub struct CreateView {
    gateway: SharedGateway,
    /// Form inputs, bound directly by the front end.
    pub form: TaskForm,
    submitting: bool,
    error: Option<String>,
}

impl CreateView {
    #[must_use]
    pub fn new(gateway: SharedGateway) -> Self {
        Self::with_form(gateway, TaskForm::blank())
    }

    #[must_use]
    pub fn with_form(gateway: SharedGateway, form: TaskForm) -> Self {
        Self {
            gateway,
            form,
            submitting: false,
            error: None,
        }
    }

    /// Creates the task and returns to the list.
    ///
    /// On failure the message is kept and the form stays editable.
    pub async fn submit(&mut self) -> Navigation {
        self.submitting = true;
        self.error = None;

        if !self.form.has_due_date() {
            self.error = Some(DUE_DATE_REQUIRED.to_string());
            self.submitting = false;
            return Navigation::Stay;
        }

        match self.gateway.create_task(&self.form.to_payload()).await {
            Ok(task) => {
                tracing::debug!(task_id = %task.id, "Task created from form");
                Navigation::To(Route::List)
            }
            Err(error) => {
                let message = error.message();
                self.error = Some(if message.is_empty() {
                    SOMETHING_WENT_WRONG.to_string()
                } else {
                    message
                });
                self.submitting = false;
                Navigation::Stay
            }
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
