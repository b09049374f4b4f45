//! HTTP request layer.
//!
//! Maps form submissions onto the store and redirects back to the listing.
//!
//! # Submodules
//!
//! - [`routes`] - Route handlers and view payloads
//! - [`forms`] - Form payloads and presence validation
//! - [`error`] - Error to HTTP response mapping

pub mod error;
pub mod forms;
pub mod routes;

use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::Result;
use crate::storage::SqliteStorage;

pub use error::WebError;

/// Shared state for all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub storage: Arc<SqliteStorage>,
}

impl AppState {
    #[must_use]
    pub fn new(storage: SqliteStorage) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }
}

/// Build the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index_handler))
        .route(
            "/crear",
            get(routes::new_task_form_handler).post(routes::create_task_handler),
        )
        .route("/completar/{task_id}", get(routes::complete_task_handler))
        .route("/eliminar/{task_id}", get(routes::delete_task_handler))
        .route(
            "/proyecto/nuevo",
            get(routes::new_project_form_handler).post(routes::create_project_handler),
        )
        .route(
            "/tarea/editar/{task_id}",
            get(routes::edit_task_form_handler).post(routes::edit_task_handler),
        )
        .route(
            "/proyecto/editar/{project_id}",
            get(routes::edit_project_form_handler).post(routes::edit_project_handler),
        )
        .route(
            "/proyecto/eliminar/{project_id}",
            get(routes::delete_project_handler),
        )
        .route("/health", get(routes::health_check_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot bind or the server fails.
#[tracing::instrument(skip(storage))]
pub async fn start_web_server(storage: SqliteStorage, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        db = %storage.path().display(),
        "Web server running on http://{}",
        listener.local_addr()?
    );

    let app = create_router(AppState::new(storage));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
