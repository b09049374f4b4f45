//! Command implementations.

pub mod completions;
pub mod init;
pub mod project;
pub mod serve;
pub mod task;
pub mod version;

use crate::config::require_db_path;
use crate::error::Result;
use crate::storage::SqliteStorage;
use std::path::PathBuf;

/// Resolve the database path and open (bootstrapping if needed).
pub(crate) fn open_storage(db_path: Option<&PathBuf>) -> Result<SqliteStorage> {
    let path = require_db_path(db_path.map(PathBuf::as_path))?;
    SqliteStorage::open(&path)
}
