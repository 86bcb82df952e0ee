//! Task form state shared by the create and edit screens.

use chrono::{NaiveDate, Utc};

use crate::api::TaskResponse;
use crate::client::TaskPayload;
use crate::domain::TaskStatus;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Editable task fields as bound to form inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    /// `YYYY-MM-DD`, or empty when the user cleared the field.
    pub due_date: String,
}

impl TaskForm {
    /// Blank form: status `pending`, due today (UTC).
    #[must_use]
    pub fn blank() -> Self {
        Self::blank_on(Utc::now().date_naive())
    }

    #[must_use]
    pub fn blank_on(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::Pending,
            due_date: today.format(DATE_FORMAT).to_string(),
        }
    }

    /// Form pre-populated from a stored task.
    #[must_use]
    pub fn from_task(task: &TaskResponse) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            due_date: task.due_date.format(DATE_FORMAT).to_string(),
        }
    }

    #[must_use]
    pub fn has_due_date(&self) -> bool {
        !self.due_date.trim().is_empty()
    }

    #[must_use]
    pub fn to_payload(&self) -> TaskPayload {
        TaskPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
            due_date: self.due_date.clone(),
        }
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::blank()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    fn test_blank_form_defaults() {
        let form = TaskForm::blank_on(NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());

        assert_eq!(form.status, TaskStatus::Pending);
        assert_eq!(form.due_date, "2025-06-09");
        assert!(form.title.is_empty());
    }

    #[rstest]
    fn test_from_task_formats_due_date() {
        let task = TaskResponse {
            id: TaskId::FIRST,
            title: "Buy milk".to_string(),
            description: "2%".to_string(),
            status: TaskStatus::Complete,
            due_date: Utc.with_ymd_and_hms(2025, 1, 1, 23, 30, 0).unwrap(),
        };

        let form = TaskForm::from_task(&task);

        assert_eq!(form.due_date, "2025-01-01");
        assert_eq!(form.to_payload().status, TaskStatus::Complete);
    }

    #[rstest]
    #[case("", false)]
    #[case("   ", false)]
    #[case("2025-01-01", true)]
    fn test_has_due_date(#[case] due_date: &str, #[case] expected: bool) {
        let form = TaskForm {
            due_date: due_date.to_string(),
            ..TaskForm::blank_on(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
        };

        assert_eq!(form.has_due_date(), expected);
    }
}
