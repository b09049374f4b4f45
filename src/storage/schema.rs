//! Database schema definitions and bootstrap logic.
//!
//! Column names keep the on-disk Spanish naming (`proyectos`, `tareas`,
//! `fecha_limite`, ...) so existing databases open unchanged.

use rusqlite::{Connection, ErrorCode, Result};
use tracing::{debug, info};

use crate::model::Project;

/// The complete SQL schema for the Tareas database.
///
/// Dates are free-form TEXT. `tareas.proyecto_id` references `proyectos.id`
/// without cascade rules.
pub const SCHEMA_SQL: &str = r#"
-- Projects: named groupings of tasks
CREATE TABLE IF NOT EXISTS proyectos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    descripcion TEXT,
    fecha_inicio TEXT,
    estado TEXT
);

-- Tasks: units of work owned by a project
CREATE TABLE IF NOT EXISTS tareas (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    titulo TEXT NOT NULL,
    descripcion TEXT,
    fecha_creacion TEXT,
    fecha_limite TEXT,
    prioridad TEXT,
    estado TEXT,
    proyecto_id INTEGER,
    FOREIGN KEY (proyecto_id) REFERENCES proyectos(id)
);

CREATE INDEX IF NOT EXISTS idx_tareas_estado ON tareas(estado);
CREATE INDEX IF NOT EXISTS idx_tareas_fecha_limite ON tareas(fecha_limite);
"#;

/// Apply per-connection settings.
///
/// Foreign-key enforcement stays off: deleting a project must leave its
/// tasks in place, referencing the removed id.
///
/// # Errors
///
/// Returns an error if a pragma cannot be set.
pub fn configure_connection(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "OFF")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;
    Ok(())
}

/// Apply the schema and seed the default project.
///
/// Idempotent: every statement uses `IF NOT EXISTS` and the seed insert
/// tolerates an existing row.
///
/// # Errors
///
/// Returns an error if the SQL execution fails for any reason other than
/// the seed row already existing.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.execute_batch(SCHEMA_SQL)?;

    if seed_default_project(conn)? {
        info!("Seeded default project");
    } else {
        debug!("Default project already present");
    }

    Ok(())
}

/// Insert the default project (id 0).
///
/// Returns `true` when the row was inserted and `false` when it already
/// existed. Only a constraint violation is swallowed.
///
/// # Errors
///
/// Returns any non-constraint SQLite failure.
pub fn seed_default_project(conn: &Connection) -> Result<bool> {
    let general = Project::default_project();
    let inserted = conn.execute(
        "INSERT INTO proyectos (id, nombre, descripcion, estado) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![general.id, general.name, general.description, general.status],
    );

    match inserted {
        Ok(_) => Ok(true),
        Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
