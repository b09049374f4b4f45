//! Route handlers.
//!
//! Views return plain JSON data; markup is left to whatever renders it.
//! Mutations redirect back to the listing. Only the edit routes check that
//! the target row exists.

use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::{Form, Json};
use serde::Serialize;
use std::sync::Arc;

use super::AppState;
use super::error::WebError;
use super::forms::{EditProjectForm, NewProjectForm, TaskForm};
use crate::error::{Error, Result};
use crate::model::{Project, ProjectStatus, Task, TaskStatus, assignable_projects};
use crate::storage::SqliteStorage;

/// Listing page data: pending tasks plus every project.
#[derive(Debug, Serialize)]
pub struct IndexView {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
}

/// Task creation form data.
#[derive(Debug, Serialize)]
pub struct TaskFormView {
    pub projects: Vec<Project>,
}

/// Task edit form data.
#[derive(Debug, Serialize)]
pub struct TaskEditView {
    pub task: Task,
    pub projects: Vec<Project>,
}

/// Project creation form data.
#[derive(Debug, Serialize)]
pub struct ProjectFormView {
    pub statuses: Vec<&'static str>,
}

/// Project edit form data.
#[derive(Debug, Serialize)]
pub struct ProjectEditView {
    pub project: Project,
    pub statuses: Vec<&'static str>,
}

/// Run a store call on the blocking pool.
async fn with_storage<F, R>(state: &AppState, f: F) -> std::result::Result<R, WebError>
where
    F: FnOnce(&SqliteStorage) -> Result<R> + Send + 'static,
    R: Send + 'static,
{
    let storage = Arc::clone(&state.storage);
    Ok(tokio::task::spawn_blocking(move || f(&storage)).await??)
}

fn back_to_index() -> Redirect {
    Redirect::to("/")
}

/// Picker for the edit form: assignable projects, plus the task's current
/// project when it would otherwise be missing.
fn edit_picker(projects: &[Project], current_project_id: i64) -> Vec<Project> {
    let mut picker = assignable_projects(projects);
    if !picker.iter().any(|p| p.id == current_project_id) {
        if let Some(current) = projects.iter().find(|p| p.id == current_project_id) {
            picker.push(current.clone());
        }
    }
    picker
}

/// GET /
#[tracing::instrument(skip(state))]
pub async fn index_handler(
    State(state): State<AppState>,
) -> std::result::Result<Json<IndexView>, WebError> {
    let view = with_storage(&state, |storage| {
        Ok(IndexView {
            tasks: storage.list_tasks(Some(TaskStatus::PENDING))?,
            projects: storage.list_projects()?,
        })
    })
    .await?;
    Ok(Json(view))
}

/// GET /crear
#[tracing::instrument(skip(state))]
pub async fn new_task_form_handler(
    State(state): State<AppState>,
) -> std::result::Result<Json<TaskFormView>, WebError> {
    let projects = with_storage(&state, SqliteStorage::list_projects).await?;
    Ok(Json(TaskFormView {
        projects: assignable_projects(&projects),
    }))
}

/// POST /crear
#[tracing::instrument(skip(state, form))]
pub async fn create_task_handler(
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> std::result::Result<Redirect, WebError> {
    let task = form.into_task()?;
    with_storage(&state, move |storage| storage.create_task(&task)).await?;
    Ok(back_to_index())
}

/// GET /completar/{task_id}
#[tracing::instrument(skip(state))]
pub async fn complete_task_handler(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> std::result::Result<Redirect, WebError> {
    let matched = with_storage(&state, move |storage| {
        storage.update_task_status(task_id, TaskStatus::COMPLETED)
    })
    .await?;
    if !matched {
        tracing::debug!(task_id, "Complete matched no task");
    }
    Ok(back_to_index())
}

/// GET /eliminar/{task_id}
#[tracing::instrument(skip(state))]
pub async fn delete_task_handler(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> std::result::Result<Redirect, WebError> {
    with_storage(&state, move |storage| storage.delete_task(task_id)).await?;
    Ok(back_to_index())
}

/// GET /proyecto/nuevo
#[tracing::instrument]
pub async fn new_project_form_handler() -> Json<ProjectFormView> {
    Json(ProjectFormView {
        statuses: ProjectStatus::ALL.to_vec(),
    })
}

/// POST /proyecto/nuevo
#[tracing::instrument(skip(state, form))]
pub async fn create_project_handler(
    State(state): State<AppState>,
    Form(form): Form<NewProjectForm>,
) -> std::result::Result<Redirect, WebError> {
    let project = form.into_project()?;
    with_storage(&state, move |storage| storage.create_project(&project)).await?;
    Ok(back_to_index())
}

/// GET /tarea/editar/{task_id}
#[tracing::instrument(skip(state))]
pub async fn edit_task_form_handler(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> std::result::Result<Json<TaskEditView>, WebError> {
    let view = with_storage(&state, move |storage| {
        let task = storage
            .get_task(task_id)?
            .ok_or(Error::TaskNotFound { id: task_id })?;
        let projects = storage.list_projects()?;
        Ok(TaskEditView {
            projects: edit_picker(&projects, task.project_id),
            task,
        })
    })
    .await?;
    Ok(Json(view))
}

/// POST /tarea/editar/{task_id}
#[tracing::instrument(skip(state, form))]
pub async fn edit_task_handler(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Form(form): Form<TaskForm>,
) -> std::result::Result<Redirect, WebError> {
    let edit = form.into_edit()?;
    with_storage(&state, move |storage| {
        let mut task = storage
            .get_task(task_id)?
            .ok_or(Error::TaskNotFound { id: task_id })?;
        task.apply_edit(edit);
        storage.save_task(&task)
    })
    .await?;
    Ok(back_to_index())
}

/// GET /proyecto/editar/{project_id}
#[tracing::instrument(skip(state))]
pub async fn edit_project_form_handler(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> std::result::Result<Json<ProjectEditView>, WebError> {
    let project = with_storage(&state, move |storage| {
        storage
            .get_project(project_id)?
            .ok_or(Error::ProjectNotFound { id: project_id })
    })
    .await?;
    Ok(Json(ProjectEditView {
        project,
        statuses: ProjectStatus::ALL.to_vec(),
    }))
}

/// POST /proyecto/editar/{project_id}
#[tracing::instrument(skip(state, form))]
pub async fn edit_project_handler(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Form(form): Form<EditProjectForm>,
) -> std::result::Result<Redirect, WebError> {
    with_storage(&state, move |storage| {
        let mut project = storage
            .get_project(project_id)?
            .ok_or(Error::ProjectNotFound { id: project_id })?;
        let edit = form.into_edit(&project.status)?;
        project.apply_edit(edit);
        storage.update_project(&project)
    })
    .await?;
    Ok(back_to_index())
}

/// GET /proyecto/eliminar/{project_id}
#[tracing::instrument(skip(state))]
pub async fn delete_project_handler(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
) -> std::result::Result<Redirect, WebError> {
    with_storage(&state, move |storage| storage.delete_project(project_id)).await?;
    Ok(back_to_index())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}
