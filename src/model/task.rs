//! Task model for Tareas.

use serde::{Deserialize, Serialize};

use super::project::DEFAULT_PROJECT_ID;

/// Conventional task status values.
pub struct TaskStatus;

impl TaskStatus {
    pub const PENDING: &'static str = "Pendiente";
    pub const COMPLETED: &'static str = "Completada";
}

/// A task in Tareas.
///
/// Dates are free-form text; `due_date` ordering is lexical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier (0 until created)
    pub id: i64,

    pub title: String,

    pub description: Option<String>,

    /// Creation timestamp, set by the store on create when absent
    pub created_at: Option<String>,

    pub due_date: Option<String>,

    /// Free-form priority ("Alta", "Media", "Baja")
    pub priority: Option<String>,

    /// "Pendiente" or "Completada" by convention
    pub status: String,

    /// Owning project (by reference only)
    pub project_id: i64,
}

/// Editable task fields, as submitted by the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub project_id: i64,
}

impl Task {
    /// Create a new, not yet persisted, pending task.
    pub fn new(title: impl Into<String>, project_id: i64) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: None,
            created_at: None,
            due_date: None,
            priority: None,
            status: TaskStatus::PENDING.to_string(),
            project_id,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    #[must_use]
    pub fn with_due_date(mut self, due_date: Option<String>) -> Self {
        self.due_date = due_date;
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Option<String>) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the task is still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == TaskStatus::PENDING
    }

    /// Whether the task sits in the default project.
    #[must_use]
    pub fn is_unclassified(&self) -> bool {
        self.project_id == DEFAULT_PROJECT_ID
    }

    /// Overwrite the editable fields. Status and timestamps are untouched.
    pub fn apply_edit(&mut self, edit: TaskEdit) {
        self.title = edit.title;
        self.description = edit.description;
        self.due_date = edit.due_date;
        self.priority = edit.priority;
        self.project_id = edit.project_id;
    }
}
