//! Task store: create/read/update/delete for `tareas`.

use crate::error::Result;
use crate::model::Task;
use crate::storage::sqlite::{SqliteStorage, collect_rows};
use rusqlite::OptionalExtension;
use tracing::{debug, info};

const TASK_COLUMNS: &str =
    "id, titulo, descripcion, fecha_creacion, fecha_limite, prioridad, estado, proyecto_id";

/// Format used for `created_at` values assigned by the store.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn now_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

impl SqliteStorage {
    /// Create a new task and return it with its assigned ID.
    ///
    /// `created_at` is set to the current local time unless the caller
    /// already supplied one.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_task(&self, task: &Task) -> Result<Task> {
        let created_at = task.created_at.clone().unwrap_or_else(now_timestamp);

        let id = self.mutate("create_task", |tx| {
            tx.execute(
                "INSERT INTO tareas (titulo, descripcion, fecha_creacion, fecha_limite, prioridad, estado, proyecto_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    task.title,
                    task.description,
                    created_at,
                    task.due_date,
                    task.priority,
                    task.status,
                    task.project_id,
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        info!(id, project_id = task.project_id, "Created task");
        Ok(Task {
            id,
            created_at: Some(created_at),
            ..task.clone()
        })
    }

    /// List tasks ordered by due date (text order), optionally filtered by
    /// exact status.
    ///
    /// Tasks without a due date sort first. Ties keep creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tasks(&self, status: Option<&str>) -> Result<Vec<Task>> {
        let mut sql = format!("SELECT {TASK_COLUMNS} FROM tareas");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![];

        if let Some(st) = status {
            sql.push_str(" WHERE estado = ?");
            params.push(Box::new(st.to_string()));
        }

        sql.push_str(" ORDER BY fecha_limite ASC, id ASC");

        self.read("list_tasks", |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|b| b.as_ref()).collect();
            let tasks = collect_rows(stmt.query_map(params_refs.as_slice(), map_task_row)?)?;
            Ok(tasks)
        })
    }

    /// Get a task by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. A missing row is `Ok(None)`.
    pub fn get_task(&self, id: i64) -> Result<Option<Task>> {
        self.read("get_task", |conn| {
            let task = conn
                .query_row(
                    &format!("SELECT {TASK_COLUMNS} FROM tareas WHERE id = ?1"),
                    [id],
                    map_task_row,
                )
                .optional()?;
            Ok(task)
        })
    }

    /// Set the status of a single task.
    ///
    /// Returns whether a row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_task_status(&self, id: i64, status: &str) -> Result<bool> {
        let affected = self.mutate("update_task_status", |tx| {
            Ok(tx.execute(
                "UPDATE tareas SET estado = ?1 WHERE id = ?2",
                rusqlite::params![status, id],
            )?)
        })?;

        debug!(id, status, affected, "Updated task status");
        Ok(affected > 0)
    }

    /// Update title, description, due date and priority of a task.
    ///
    /// Leaves `project_id` untouched; [`SqliteStorage::save_task`] is the
    /// full edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_task_fields(
        &self,
        id: i64,
        title: &str,
        description: Option<&str>,
        due_date: Option<&str>,
        priority: Option<&str>,
    ) -> Result<bool> {
        let affected = self.mutate("update_task_fields", |tx| {
            Ok(tx.execute(
                "UPDATE tareas SET titulo = ?1, descripcion = ?2, fecha_limite = ?3, prioridad = ?4
                 WHERE id = ?5",
                rusqlite::params![title, description, due_date, priority, id],
            )?)
        })?;

        debug!(id, affected, "Updated task fields");
        Ok(affected > 0)
    }

    /// Persist an edited task: title, description, due date, priority and
    /// project are overwritten by ID.
    ///
    /// Returns whether a row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn save_task(&self, task: &Task) -> Result<bool> {
        let affected = self.mutate("save_task", |tx| {
            Ok(tx.execute(
                "UPDATE tareas SET titulo = ?1, descripcion = ?2, fecha_limite = ?3, prioridad = ?4, proyecto_id = ?5
                 WHERE id = ?6",
                rusqlite::params![
                    task.title,
                    task.description,
                    task.due_date,
                    task.priority,
                    task.project_id,
                    task.id,
                ],
            )?)
        })?;

        debug!(id = task.id, affected, "Saved task");
        Ok(affected > 0)
    }

    /// Delete a task by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_task(&self, id: i64) -> Result<bool> {
        let affected = self.mutate("delete_task", |tx| {
            Ok(tx.execute("DELETE FROM tareas WHERE id = ?1", [id])?)
        })?;

        if affected > 0 {
            info!(id, "Deleted task");
        }
        Ok(affected > 0)
    }
}

fn map_task_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        created_at: row.get(3)?,
        due_date: row.get(4)?,
        priority: row.get(5)?,
        status: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        project_id: row.get::<_, Option<i64>>(7)?.unwrap_or_default(),
    })
}
