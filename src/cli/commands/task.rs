//! Task management commands.
//!
//! - `tareas task create <title>` - Create a pending task
//! - `tareas task list` - List pending tasks by due date
//! - `tareas task show <id>` - Show task details
//! - `tareas task complete <id>` - Mark a task completed
//! - `tareas task update <id>` - Edit task fields
//! - `tareas task delete <id>` - Delete a task

use super::open_storage;
use crate::cli::{TaskCommands, TaskCreateArgs, TaskUpdateArgs};
use crate::error::{Error, Result};
use crate::model::{Task, TaskEdit, TaskStatus};
use crate::storage::SqliteStorage;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct TaskListOutput {
    tasks: Vec<Task>,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
}

/// Execute a task command.
///
/// # Errors
///
/// Returns an error if the database fails or the task does not exist.
pub fn execute(command: &TaskCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let storage = open_storage(db_path)?;

    match command {
        TaskCommands::Create(args) => execute_create(&storage, args, json),
        TaskCommands::List { status, all } => {
            let filter = if *all {
                None
            } else {
                Some(status.as_deref().unwrap_or(TaskStatus::PENDING))
            };
            execute_list(&storage, filter, json)
        }
        TaskCommands::Show { id } => execute_show(&storage, *id, json),
        TaskCommands::Complete { id } => execute_complete(&storage, *id, json),
        TaskCommands::Update(args) => execute_update(&storage, args, json),
        TaskCommands::Delete { id } => execute_delete(&storage, *id, json),
    }
}

fn require_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::RequiredField { field: "title" });
    }
    Ok(title.to_string())
}

fn status_label(task: &Task) -> colored::ColoredString {
    if task.is_pending() {
        task.status.yellow()
    } else if task.status == TaskStatus::COMPLETED {
        task.status.green()
    } else {
        task.status.normal()
    }
}

fn print_task_line(task: &Task) {
    println!(
        "  {} {} [{}] {} {}",
        format!("#{}", task.id).dimmed(),
        task.title,
        status_label(task),
        task.due_date.as_deref().unwrap_or("-"),
        format!("P:{}", task.priority.as_deref().unwrap_or("-")).dimmed(),
    );
}

fn execute_create(storage: &SqliteStorage, args: &TaskCreateArgs, json: bool) -> Result<()> {
    let task = Task::new(require_title(&args.title)?, args.project)
        .with_description(args.description.clone())
        .with_due_date(args.due.clone())
        .with_priority(args.priority.clone());

    let task = storage.create_task(&task)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Created task: {}", task.title);
        println!("  ID:      {}", task.id);
        println!("  Project: {}", task.project_id);
        println!("  Created: {}", task.created_at.as_deref().unwrap_or("-"));
    }

    Ok(())
}

fn execute_list(storage: &SqliteStorage, status: Option<&str>, json: bool) -> Result<()> {
    let tasks = storage.list_tasks(status)?;

    if json {
        let output = TaskListOutput {
            count: tasks.len(),
            tasks,
            status: status.map(String::from),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if tasks.is_empty() {
        println!("No tasks found.");
        println!("\nCreate one with: tareas task create <title>");
    } else {
        println!("Tasks ({}):\n", tasks.len());
        for task in &tasks {
            print_task_line(task);
        }
    }

    Ok(())
}

fn execute_show(storage: &SqliteStorage, id: i64, json: bool) -> Result<()> {
    let task = storage.get_task(id)?.ok_or(Error::TaskNotFound { id })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Task: {}", task.title);
        println!("  ID:          {}", task.id);
        println!("  Status:      {}", status_label(&task));
        println!("  Priority:    {}", task.priority.as_deref().unwrap_or("-"));
        println!("  Due:         {}", task.due_date.as_deref().unwrap_or("-"));
        println!("  Project:     {}", task.project_id);
        println!("  Created:     {}", task.created_at.as_deref().unwrap_or("-"));
        println!("  Description: {}", task.description.as_deref().unwrap_or("-"));
    }

    Ok(())
}

fn execute_complete(storage: &SqliteStorage, id: i64, json: bool) -> Result<()> {
    if !storage.update_task_status(id, TaskStatus::COMPLETED)? {
        return Err(Error::TaskNotFound { id });
    }

    if json {
        let output = serde_json::json!({ "id": id, "status": TaskStatus::COMPLETED });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Completed task {id}");
    }

    Ok(())
}

fn execute_update(storage: &SqliteStorage, args: &TaskUpdateArgs, json: bool) -> Result<()> {
    let mut task = storage
        .get_task(args.id)?
        .ok_or(Error::TaskNotFound { id: args.id })?;

    let title = match &args.title {
        Some(title) => require_title(title)?,
        None => task.title.clone(),
    };
    let edit = TaskEdit {
        title,
        description: args.description.clone().or_else(|| task.description.clone()),
        due_date: args.due.clone().or_else(|| task.due_date.clone()),
        priority: args.priority.clone().or_else(|| task.priority.clone()),
        project_id: args.project.unwrap_or(task.project_id),
    };
    task.apply_edit(edit);

    if !storage.save_task(&task)? {
        return Err(Error::TaskNotFound { id: args.id });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        println!("Updated task:");
        print_task_line(&task);
    }

    Ok(())
}

fn execute_delete(storage: &SqliteStorage, id: i64, json: bool) -> Result<()> {
    if !storage.delete_task(id)? {
        return Err(Error::TaskNotFound { id });
    }

    if json {
        let output = serde_json::json!({ "deleted": true, "id": id });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Deleted task {id}");
    }

    Ok(())
}
