//! Initialize the Tareas database.
//!
//! Creates the database file if needed, applies the schema and seeds the
//! default project. Safe to run repeatedly.

use super::open_storage;
use crate::error::Result;
use crate::model::DEFAULT_PROJECT_ID;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct InitOutput {
    database: PathBuf,
    projects: usize,
    tasks: usize,
    default_project_id: i64,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the directory or database cannot be created.
pub fn execute(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let storage = open_storage(db_path)?;
    let projects = storage.list_projects()?.len();
    let tasks = storage.list_tasks(None)?.len();

    if json {
        let output = InitOutput {
            database: storage.path().to_path_buf(),
            projects,
            tasks,
            default_project_id: DEFAULT_PROJECT_ID,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Initialized Tareas database");
        println!("  Database: {}", storage.path().display());
        println!("  Projects: {projects}");
        println!("  Tasks:    {tasks}");
        println!();
        println!("Next: tareas serve");
    }

    Ok(())
}
