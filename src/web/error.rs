//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::{Error, ErrorCode};

/// Error type for web handler operations.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// A store or validation failure.
    #[error(transparent)]
    App(#[from] Error),

    /// The blocking store call panicked or was cancelled.
    #[error("Background task failed")]
    Join(#[from] tokio::task::JoinError),
}

impl WebError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::App(err) => match err.error_code() {
                ErrorCode::TaskNotFound | ErrorCode::ProjectNotFound => StatusCode::NOT_FOUND,
                ErrorCode::InvalidArgument | ErrorCode::RequiredField => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = match self {
            Self::App(err) => err.to_structured_json(),
            Self::Join(join) => Error::Other(join.to_string()).to_structured_json(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn can_map_not_found_to_404() {
        let response = WebError::from(Error::TaskNotFound { id: 9 }).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "TASK_NOT_FOUND");
    }

    #[tokio::test]
    async fn can_map_required_field_to_422() {
        let response = WebError::from(Error::RequiredField { field: "name" }).into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn can_map_database_error_to_500() {
        let err = Error::Database(rusqlite::Error::InvalidQuery);
        let response = WebError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "DATABASE_ERROR");
    }
}
