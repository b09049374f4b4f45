//! SQLite storage layer for Tareas.
//!
//! This module provides the persistence layer using SQLite with:
//! - One connection per operation, released on every exit path
//! - IMMEDIATE transactions for writes
//! - Idempotent schema bootstrap with a seeded default project
//!
//! # Submodules
//!
//! - [`schema`] - Database schema definitions and bootstrap
//! - [`sqlite`] - Connection handling (`SqliteStorage`)
//! - [`projects`] - Project store operations
//! - [`tasks`] - Task store operations

pub mod projects;
pub mod schema;
pub mod sqlite;
pub mod tasks;

pub use sqlite::SqliteStorage;
pub use tasks::TIMESTAMP_FORMAT;
