//! SQLite storage implementation.
//!
//! `SqliteStorage` holds only the database location. Every operation opens
//! its own connection through [`SqliteStorage::read`] or
//! [`SqliteStorage::mutate`], and the connection is dropped when the
//! closure returns, on success and on error alike.

use crate::error::{Error, Result};
use crate::storage::schema::{apply_schema, configure_connection};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, trace};

/// Default busy timeout applied to each connection.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-based storage backend.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteStorage {
    /// Open a database at the given path.
    ///
    /// Creates the file (and parent directories) if needed, then bootstraps
    /// the schema and the default project.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, None)
    }

    /// Open a database with an optional busy timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open_with_timeout(path: &Path, timeout_ms: Option<u64>) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let storage = Self {
            path: path.to_path_buf(),
            busy_timeout: timeout_ms.map_or(DEFAULT_BUSY_TIMEOUT, Duration::from_millis),
        };

        let conn = storage.connect()?;
        apply_schema(&conn)?;
        debug!(path = %storage.path.display(), "Opened database");

        Ok(storage)
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(self.busy_timeout)?;
        configure_connection(&conn)?;
        Ok(conn)
    }

    /// Run a read-only operation on a fresh connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be opened or the closure fails.
    pub fn read<F, R>(&self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Connection) -> Result<R>,
    {
        trace!(op, "read");
        let conn = self.connect()?;
        f(&conn)
    }

    /// Run a write operation inside an IMMEDIATE transaction.
    ///
    /// Commits when the closure succeeds. On error the transaction is
    /// dropped, which rolls it back.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails.
    pub fn mutate<F, R>(&self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        trace!(op, "mutate");
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let result = f(&tx)?;

        tx.commit()?;
        Ok(result)
    }
}

/// Collect mapped rows, converting the row error.
pub(crate) fn collect_rows<T>(
    rows: impl Iterator<Item = rusqlite::Result<T>>,
) -> Result<Vec<T>> {
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

#[cfg(test)]
pub(crate) fn test_storage() -> (tempfile::TempDir, SqliteStorage) {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = SqliteStorage::open(&dir.path().join("tareas.db")).expect("open storage");
    (dir, storage)
}
