//! Project model for Tareas.
//!
//! Projects group tasks. Project `0` is the permanent "general" project that
//! unclassified tasks fall back to.

use serde::{Deserialize, Serialize};

/// ID of the seeded default project.
pub const DEFAULT_PROJECT_ID: i64 = 0;

/// Conventional project status values.
///
/// The store keeps status as free text; these are the values the
/// application writes and compares against.
pub struct ProjectStatus;

impl ProjectStatus {
    pub const ACTIVE: &'static str = "Activo";
    pub const INACTIVE: &'static str = "Inactivo";

    /// All conventional statuses, in display order.
    pub const ALL: [&'static str; 2] = [Self::ACTIVE, Self::INACTIVE];
}

/// A project in Tareas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Store-assigned identifier (0 until created)
    pub id: i64,

    /// Display name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Free-form start date
    pub start_date: Option<String>,

    /// Lifecycle status ("Activo" / "Inactivo")
    pub status: String,
}

/// Editable project fields, as submitted by the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEdit {
    pub name: String,
    pub description: Option<String>,
    pub status: String,
}

impl Project {
    /// Create a new, not yet persisted, active project.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description,
            start_date: None,
            status: ProjectStatus::ACTIVE.to_string(),
        }
    }

    /// The seeded "general" project.
    #[must_use]
    pub fn default_project() -> Self {
        Self {
            id: DEFAULT_PROJECT_ID,
            name: "Tareas Generales".to_string(),
            description: Some("Tareas sin clasificar".to_string()),
            start_date: None,
            status: ProjectStatus::ACTIVE.to_string(),
        }
    }

    /// Whether this is the default project.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_PROJECT_ID
    }

    /// Whether this project is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::ACTIVE
    }

    /// Whether new tasks may be assigned to this project.
    ///
    /// The default project is always assignable, whatever its status.
    #[must_use]
    pub fn is_assignable(&self) -> bool {
        self.is_active() || self.is_default()
    }

    /// Overwrite the editable fields.
    pub fn apply_edit(&mut self, edit: ProjectEdit) {
        self.name = edit.name;
        self.description = edit.description;
        self.status = edit.status;
    }
}

/// Projects offered in the task-assignment picker.
#[must_use]
pub fn assignable_projects(projects: &[Project]) -> Vec<Project> {
    projects
        .iter()
        .filter(|p| p.is_assignable())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project() {
        let project = Project::new("Work", Some("Day job".to_string()));

        assert_eq!(project.id, 0);
        assert_eq!(project.name, "Work");
        assert_eq!(project.description.as_deref(), Some("Day job"));
        assert_eq!(project.status, ProjectStatus::ACTIVE);
        assert!(project.start_date.is_none());
    }

    #[test]
    fn test_default_project_always_assignable() {
        let mut general = Project::default_project();
        general.status = ProjectStatus::INACTIVE.to_string();

        assert!(general.is_default());
        assert!(!general.is_active());
        assert!(general.is_assignable());
    }

    #[test]
    fn test_assignable_projects_filters_inactive() {
        let mut active = Project::new("Active", None);
        active.id = 1;
        let mut inactive = Project::new("Dormant", None);
        inactive.id = 2;
        inactive.status = ProjectStatus::INACTIVE.to_string();
        let mut odd = Project::new("Odd", None);
        odd.id = 3;
        odd.status = "activo".to_string();

        let projects = vec![Project::default_project(), active, inactive, odd];
        let ids: Vec<i64> = assignable_projects(&projects).iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_apply_edit() {
        let mut project = Project::new("Old", None);
        project.apply_edit(ProjectEdit {
            name: "New".to_string(),
            description: Some("desc".to_string()),
            status: ProjectStatus::INACTIVE.to_string(),
        });

        assert_eq!(project.name, "New");
        assert_eq!(project.description.as_deref(), Some("desc"));
        assert_eq!(project.status, ProjectStatus::INACTIVE);
    }
}
