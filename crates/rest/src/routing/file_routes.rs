//! File server route configuration.

use axum::{Router, routing::get};
use siteserve_storage::FileStore;

use crate::handlers;
use crate::state::AppState;

/// Creates all routes.
///
/// # Routes
///
/// - `GET|HEAD {files_prefix}/{*path}` - Public file for the requested site
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// Anything else, including `{files_prefix}` and `{files_prefix}/` with no
/// path, gets the same 404 as a missing file.
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: FileStore + 'static,
{
    let files_route = format!("{}/{{*path}}", state.files_prefix());

    Router::new()
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        .route(&files_route, get(handlers::serve_file_handler::<S>))
        .fallback(handlers::not_found_handler)
        .with_state(state)
}
