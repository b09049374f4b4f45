//! Form payloads accepted by the HTTP routes.
//!
//! Field names follow the model; the Spanish column names are accepted as
//! aliases.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{DEFAULT_PROJECT_ID, Project, ProjectEdit, Task, TaskEdit};

/// Task create/edit form.
#[derive(Debug, Default, Deserialize)]
pub struct TaskForm {
    #[serde(default, alias = "titulo")]
    pub title: String,
    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
    #[serde(default, alias = "fecha_limite")]
    pub due_date: Option<String>,
    #[serde(default, alias = "prioridad")]
    pub priority: Option<String>,
    #[serde(default, alias = "proyecto_id")]
    pub project_id: Option<String>,
}

/// New-project form.
#[derive(Debug, Default, Deserialize)]
pub struct NewProjectForm {
    #[serde(default, alias = "nombre")]
    pub name: String,
    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
}

/// Project edit form.
#[derive(Debug, Default, Deserialize)]
pub struct EditProjectForm {
    #[serde(default, alias = "nombre")]
    pub name: String,
    #[serde(default, alias = "descripcion")]
    pub description: Option<String>,
    #[serde(default, alias = "estado")]
    pub status: Option<String>,
}

impl TaskForm {
    /// Validate presence and convert into a task edit.
    ///
    /// # Errors
    ///
    /// `RequiredField` for a blank title, `InvalidArgument` for a
    /// non-numeric project ID.
    pub fn into_edit(self) -> Result<TaskEdit> {
        Ok(TaskEdit {
            title: required(self.title, "title")?,
            description: optional(self.description),
            due_date: optional(self.due_date),
            priority: optional(self.priority),
            project_id: parse_project_id(self.project_id)?,
        })
    }

    /// Validate and build a new pending task.
    ///
    /// # Errors
    ///
    /// See [`TaskForm::into_edit`].
    pub fn into_task(self) -> Result<Task> {
        let edit = self.into_edit()?;
        let mut task = Task::new(String::new(), edit.project_id);
        task.apply_edit(edit);
        Ok(task)
    }
}

impl NewProjectForm {
    /// Validate and build a new active project.
    ///
    /// # Errors
    ///
    /// `RequiredField` for a blank name.
    pub fn into_project(self) -> Result<Project> {
        let name = required(self.name, "name")?;
        Ok(Project::new(name, optional(self.description)))
    }
}

impl EditProjectForm {
    /// Validate and convert into a project edit.
    ///
    /// A blank status keeps `current_status`.
    ///
    /// # Errors
    ///
    /// `RequiredField` for a blank name.
    pub fn into_edit(self, current_status: &str) -> Result<ProjectEdit> {
        Ok(ProjectEdit {
            name: required(self.name, "name")?,
            description: optional(self.description),
            status: optional(self.status).unwrap_or_else(|| current_status.to_string()),
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::RequiredField { field });
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_project_id(value: Option<String>) -> Result<i64> {
    match optional(value) {
        None => Ok(DEFAULT_PROJECT_ID),
        Some(raw) => raw
            .parse()
            .map_err(|_| Error::InvalidArgument(format!("project_id must be an integer, got '{raw}'"))),
    }
}
