//! Serve command: run the HTTP request layer.

use super::open_storage;
use crate::config::resolve_bind_addr;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Execute the serve command. Blocks until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, the address is
/// invalid, or the server fails.
pub fn execute(bind: Option<&str>, db_path: Option<&PathBuf>) -> Result<()> {
    let addr = resolve_bind_addr(bind)?;
    let storage = open_storage(db_path)?;

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))?;

    rt.block_on(crate::web::start_web_server(storage, addr))
}
