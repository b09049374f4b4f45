//! Project management commands.
//!
//! - `tareas project create <name>` - Create a new project
//! - `tareas project list` - List all projects
//! - `tareas project show <id>` - Show project details
//! - `tareas project update <id>` - Update project fields
//! - `tareas project delete <id>` - Delete a project

use super::open_storage;
use crate::cli::{ProjectCommands, ProjectCreateArgs, ProjectUpdateArgs};
use crate::error::{Error, Result};
use crate::model::{Project, ProjectEdit, TaskStatus, assignable_projects};
use crate::storage::SqliteStorage;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct ProjectListOutput {
    projects: Vec<Project>,
    count: usize,
}

#[derive(Serialize)]
struct ProjectWithCounts {
    #[serde(flatten)]
    project: Project,
    pending_tasks: usize,
    total_tasks: usize,
}

/// Execute a project command.
///
/// # Errors
///
/// Returns an error if the database fails or the project does not exist.
pub fn execute(command: &ProjectCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let storage = open_storage(db_path)?;

    match command {
        ProjectCommands::Create(args) => execute_create(&storage, args, json),
        ProjectCommands::List { assignable } => execute_list(&storage, *assignable, json),
        ProjectCommands::Show { id } => execute_show(&storage, *id, json),
        ProjectCommands::Update(args) => execute_update(&storage, args, json),
        ProjectCommands::Delete { id } => execute_delete(&storage, *id, json),
    }
}

fn require_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::RequiredField { field: "name" });
    }
    Ok(name.to_string())
}

fn status_label(project: &Project) -> colored::ColoredString {
    if project.is_active() {
        project.status.green()
    } else {
        project.status.dimmed()
    }
}

fn execute_create(storage: &SqliteStorage, args: &ProjectCreateArgs, json: bool) -> Result<()> {
    let mut project = Project::new(require_name(&args.name)?, args.description.clone());
    project.start_date.clone_from(&args.start_date);

    let project = storage.create_project(&project)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
    } else {
        println!("Created project: {}", project.name);
        println!("  ID:     {}", project.id);
        println!("  Status: {}", status_label(&project));
    }

    Ok(())
}

fn execute_list(storage: &SqliteStorage, assignable: bool, json: bool) -> Result<()> {
    let mut projects = storage.list_projects()?;
    if assignable {
        projects = assignable_projects(&projects);
    }

    if json {
        let output = ProjectListOutput {
            count: projects.len(),
            projects,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Projects ({}):\n", projects.len());
        for project in &projects {
            println!(
                "  {} {} [{}]",
                format!("#{}", project.id).dimmed(),
                project.name,
                status_label(project)
            );
            if let Some(desc) = project.description.as_deref().filter(|d| !d.is_empty()) {
                println!("    {desc}");
            }
        }
    }

    Ok(())
}

fn execute_show(storage: &SqliteStorage, id: i64, json: bool) -> Result<()> {
    let project = storage
        .get_project(id)?
        .ok_or(Error::ProjectNotFound { id })?;

    let tasks: Vec<_> = storage
        .list_tasks(None)?
        .into_iter()
        .filter(|t| t.project_id == id)
        .collect();
    let pending_tasks = tasks
        .iter()
        .filter(|t| t.status == TaskStatus::PENDING)
        .count();

    if json {
        let output = ProjectWithCounts {
            project,
            pending_tasks,
            total_tasks: tasks.len(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Project: {}", project.name);
        println!("  ID:          {}", project.id);
        println!("  Status:      {}", status_label(&project));
        println!("  Description: {}", project.description.as_deref().unwrap_or("-"));
        println!("  Start date:  {}", project.start_date.as_deref().unwrap_or("-"));
        println!();
        println!("Tasks: {} pending / {} total", pending_tasks, tasks.len());
    }

    Ok(())
}

fn execute_update(storage: &SqliteStorage, args: &ProjectUpdateArgs, json: bool) -> Result<()> {
    let mut project = storage
        .get_project(args.id)?
        .ok_or(Error::ProjectNotFound { id: args.id })?;

    let name = match &args.name {
        Some(name) => require_name(name)?,
        None => project.name.clone(),
    };
    let edit = ProjectEdit {
        name,
        description: args.description.clone().or_else(|| project.description.clone()),
        status: args.status.clone().unwrap_or_else(|| project.status.clone()),
    };
    project.apply_edit(edit);

    if !storage.update_project(&project)? {
        return Err(Error::ProjectNotFound { id: args.id });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
    } else {
        println!("Updated project: {}", project.name);
        println!("  Status: {}", status_label(&project));
    }

    Ok(())
}

fn execute_delete(storage: &SqliteStorage, id: i64, json: bool) -> Result<()> {
    let project = storage
        .get_project(id)?
        .ok_or(Error::ProjectNotFound { id })?;

    if project.is_default() {
        return Err(Error::InvalidArgument(
            "the default project cannot be deleted".to_string(),
        ));
    }

    if !storage.delete_project(id)? {
        return Err(Error::ProjectNotFound { id });
    }

    if json {
        let output = serde_json::json!({
            "deleted": true,
            "id": project.id,
            "name": project.name,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Deleted project: {} ({})", project.name, project.id);
    }

    Ok(())
}
