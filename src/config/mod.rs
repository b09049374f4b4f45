//! Configuration management.
//!
//! Resolves the database location and the HTTP bind address.
//!
//! # Architecture
//!
//! Tareas keeps a single database file:
//! - **Default**: `~/.tareas/tareas.db`
//! - **Override**: `--db <path>` or `TAREAS_DB`

use crate::error::{Error, Result};

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Database file name inside the global directory.
pub const DB_FILE_NAME: &str = "tareas.db";

/// Default address for `tareas serve`.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Get the global Tareas directory location (`~/.tareas/`).
#[must_use]
pub fn global_tareas_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".tareas"))
}

/// Resolve the database path.
///
/// Priority:
/// 1. If `explicit_path` is provided, use it directly
/// 2. `TAREAS_DB` environment variable
/// 3. Global location: `~/.tareas/tareas.db`
///
/// # Returns
///
/// Returns the path to the database file, or `None` if no location found.
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if let Ok(db_path) = std::env::var("TAREAS_DB") {
        if !db_path.trim().is_empty() {
            return Some(PathBuf::from(db_path));
        }
    }

    global_tareas_dir().map(|dir| dir.join(DB_FILE_NAME))
}

/// Resolve the database path or fail with a configuration error.
///
/// # Errors
///
/// Returns `Error::Config` if no home directory can be determined.
pub fn require_db_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    resolve_db_path(explicit_path)
        .ok_or_else(|| Error::Config("Could not determine database location".to_string()))
}

/// Parse the bind address for the HTTP server.
///
/// Falls back to [`DEFAULT_BIND_ADDR`] when nothing is given.
///
/// # Errors
///
/// Returns `Error::Config` if the address does not parse.
pub fn resolve_bind_addr(explicit: Option<&str>) -> Result<SocketAddr> {
    let raw = explicit
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BIND_ADDR);

    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid bind address '{raw}': {e}")))
}
