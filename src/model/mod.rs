//! Data models for Tareas.
//!
//! This module contains the two domain entities:
//! - Project
//! - Task

pub mod project;
pub mod task;

pub use project::{DEFAULT_PROJECT_ID, Project, ProjectEdit, ProjectStatus, assignable_projects};
pub use task::{Task, TaskEdit, TaskStatus};
