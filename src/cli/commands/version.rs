//! Version command.

use crate::config::resolve_db_path;
use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    profile: &'static str,
    sqlite: &'static str,
    default_database: Option<PathBuf>,
}

impl VersionInfo {
    fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            profile: if cfg!(debug_assertions) { "debug" } else { "release" },
            sqlite: rusqlite::version(),
            default_database: resolve_db_path(None),
        }
    }
}

/// Print the crate version, build profile and linked SQLite version.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let info = VersionInfo::current();

    if json {
        println!("{}", serde_json::to_string(&info)?);
    } else {
        println!("{} {} ({}, SQLite {})", info.name, info.version, info.profile, info.sqlite);
    }

    Ok(())
}
