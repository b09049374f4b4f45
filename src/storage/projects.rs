//! Project store: create/read/update/delete for `proyectos`.

use crate::error::Result;
use crate::model::{DEFAULT_PROJECT_ID, Project};
use crate::storage::sqlite::{SqliteStorage, collect_rows};
use rusqlite::OptionalExtension;
use tracing::{debug, info, warn};

const PROJECT_COLUMNS: &str = "id, nombre, descripcion, fecha_inicio, estado";

impl SqliteStorage {
    /// Create a new project and return it with its assigned ID.
    ///
    /// The ID on the input is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_project(&self, project: &Project) -> Result<Project> {
        let id = self.mutate("create_project", |tx| {
            tx.execute(
                "INSERT INTO proyectos (nombre, descripcion, fecha_inicio, estado)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    project.name,
                    project.description,
                    project.start_date,
                    project.status,
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        info!(id, name = %project.name, "Created project");
        Ok(Project {
            id,
            ..project.clone()
        })
    }

    /// List all projects, ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        self.read("list_projects", |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {PROJECT_COLUMNS} FROM proyectos ORDER BY id ASC"))?;
            let projects = collect_rows(stmt.query_map([], map_project_row)?)?;
            Ok(projects)
        })
    }

    /// Get a project by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. A missing row is `Ok(None)`.
    pub fn get_project(&self, id: i64) -> Result<Option<Project>> {
        self.read("get_project", |conn| {
            let project = conn
                .query_row(
                    &format!("SELECT {PROJECT_COLUMNS} FROM proyectos WHERE id = ?1"),
                    [id],
                    map_project_row,
                )
                .optional()?;
            Ok(project)
        })
    }

    /// Overwrite name, description and status of a project.
    ///
    /// Returns whether a row matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_project(&self, project: &Project) -> Result<bool> {
        let affected = self.mutate("update_project", |tx| {
            Ok(tx.execute(
                "UPDATE proyectos SET nombre = ?1, descripcion = ?2, estado = ?3 WHERE id = ?4",
                rusqlite::params![project.name, project.description, project.status, project.id],
            )?)
        })?;

        debug!(id = project.id, affected, "Updated project");
        Ok(affected > 0)
    }

    /// Delete a project by ID.
    ///
    /// Tasks referencing the project are left untouched. The default
    /// project is never deleted; asking for it returns `false`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_project(&self, id: i64) -> Result<bool> {
        if id == DEFAULT_PROJECT_ID {
            warn!("Refusing to delete the default project");
            return Ok(false);
        }

        let affected = self.mutate("delete_project", |tx| {
            Ok(tx.execute("DELETE FROM proyectos WHERE id = ?1", [id])?)
        })?;

        if affected > 0 {
            info!(id, "Deleted project");
        }
        Ok(affected > 0)
    }
}

fn map_project_row(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        start_date: row.get(3)?,
        status: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use crate::model::{DEFAULT_PROJECT_ID, Project, ProjectStatus};
    use crate::storage::sqlite::test_storage;

    #[test]
    fn test_project_crud() {
        let (_dir, storage) = test_storage();

        // Create
        let created = storage
            .create_project(&Project::new("Work", Some(String::new())))
            .unwrap();
        assert!(created.id > 0);

        // Read
        let fetched = storage.get_project(created.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Work");
        assert_eq!(fetched.description.as_deref(), Some(""));
        assert_eq!(fetched.status, ProjectStatus::ACTIVE);

        // Update
        let mut edited = fetched.clone();
        edited.name = "Office".to_string();
        edited.status = ProjectStatus::INACTIVE.to_string();
        assert!(storage.update_project(&edited).unwrap());
        let fetched = storage.get_project(created.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Office");
        assert_eq!(fetched.status, ProjectStatus::INACTIVE);

        // Delete
        assert!(storage.delete_project(created.id).unwrap());
        assert!(storage.get_project(created.id).unwrap().is_none());
        assert!(!storage.delete_project(created.id).unwrap());
    }

    #[test]
    fn test_list_includes_default_project() {
        let (_dir, storage) = test_storage();
        storage.create_project(&Project::new("A", None)).unwrap();
        storage.create_project(&Project::new("B", None)).unwrap();

        let projects = storage.list_projects().unwrap();
        let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(projects[0].id, DEFAULT_PROJECT_ID);
        assert_eq!(names, vec!["Tareas Generales", "A", "B"]);
    }

    #[test]
    fn test_update_missing_project_matches_nothing() {
        let (_dir, storage) = test_storage();
        let mut ghost = Project::new("Ghost", None);
        ghost.id = 404;

        assert!(!storage.update_project(&ghost).unwrap());
        assert_eq!(storage.list_projects().unwrap().len(), 1);
    }

    #[test]
    fn test_default_project_cannot_be_deleted() {
        let (_dir, storage) = test_storage();

        assert!(!storage.delete_project(DEFAULT_PROJECT_ID).unwrap());
        assert!(storage.get_project(DEFAULT_PROJECT_ID).unwrap().is_some());
    }

    #[test]
    fn test_start_date_round_trips() {
        let (_dir, storage) = test_storage();
        let mut project = Project::new("Dated", None);
        project.start_date = Some("2025-01-15".to_string());

        let created = storage.create_project(&project).unwrap();
        let fetched = storage.get_project(created.id).unwrap().unwrap();

        assert_eq!(fetched.start_date.as_deref(), Some("2025-01-15"));
    }
}
