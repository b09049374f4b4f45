//! Error types for Tareas.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=db, 3=not_found, 4=validation, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for the CLI and the HTTP layer

use thiserror::Error;

/// Result type alias for Tareas operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Database (exit 2)
    DatabaseError,

    // Not Found (exit 3)
    TaskNotFound,
    ProjectNotFound,

    // Validation (exit 4)
    InvalidArgument,
    RequiredField,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::DatabaseError => "DATABASE_ERROR",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::RequiredField => "REQUIRED_FIELD",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::DatabaseError => 2,
            Self::TaskNotFound | Self::ProjectNotFound => 3,
            Self::InvalidArgument | Self::RequiredField => 4,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether the caller should retry with corrected input.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument | Self::RequiredField | Self::DatabaseError
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in Tareas operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {id}")]
    TaskNotFound { id: i64 },

    #[error("Project not found: {id}")]
    ProjectNotFound { id: i64 },

    #[error("Missing required field: {field}")]
    RequiredField { field: &'static str },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::TaskNotFound { .. } => ErrorCode::TaskNotFound,
            Self::ProjectNotFound { .. } => ErrorCode::ProjectNotFound,
            Self::RequiredField { .. } => ErrorCode::RequiredField,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// True for the not-found category.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound { .. } | Self::ProjectNotFound { .. })
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::TaskNotFound { id } => Some(format!(
                "No task with ID {id}. Use `tareas task list --all` to see available tasks."
            )),
            Self::ProjectNotFound { id } => Some(format!(
                "No project with ID {id}. Use `tareas project list` to see available projects."
            )),
            Self::RequiredField { field } => Some(format!("Provide a non-empty `{field}`.")),
            Self::Config(_) => Some(
                "Pass `--db <path>` or set TAREAS_DB to choose the database location.".to_string(),
            ),
            Self::Database(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::InvalidArgument(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_exit_code() {
        let err = Error::TaskNotFound { id: 7 };
        assert_eq!(err.exit_code(), 3);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Task not found: 7");
    }

    #[test]
    fn test_structured_json_includes_hint() {
        let err = Error::ProjectNotFound { id: 4 };
        let json = err.to_structured_json();

        assert_eq!(json["error"]["code"], "PROJECT_NOT_FOUND");
        assert_eq!(json["error"]["exit_code"], 3);
        assert_eq!(json["error"]["retryable"], false);
        assert!(json["error"]["hint"].as_str().unwrap().contains("project list"));
    }

    #[test]
    fn test_required_field_is_retryable() {
        let err = Error::RequiredField { field: "title" };
        assert_eq!(err.exit_code(), 4);
        assert!(err.error_code().is_retryable());
        assert!(err.to_structured_json()["error"].get("hint").is_some());
    }

    #[test]
    fn test_other_has_no_hint() {
        let err = Error::Other("boom".to_string());
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_structured_json()["error"].get("hint").is_none());
    }
}
