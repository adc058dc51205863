//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness endpoints for monitoring and load
//! balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use siteserve_storage::{FileKind, FileStore};
use tracing::{debug, warn};

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - Server is healthy
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: FileStore + 'static,
{
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for a liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for a readiness probe.
///
/// Ready once the storage root exists and is a directory.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
///
/// # Response
///
/// - `200 OK` - Storage root is usable
/// - `503 Service Unavailable` - Storage root is missing or not a directory
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: FileStore + 'static,
{
    debug!("Processing readiness check request");

    let files = state.files();
    let storage_ok = match files.store().metadata(files.storage_root()).await {
        Ok(md) => md.kind == FileKind::Directory,
        Err(err) => {
            warn!(error = %err, "Storage root is not available");
            false
        }
    };

    let (status, label) = if storage_ok {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not-ready")
    };

    let response = serde_json::json!({
        "status": label,
        "backend": state.backend_name(),
        "checks": {
            "storage": if storage_ok { "ok" } else { "unavailable" }
        }
    });

    Ok((status, Json(response)).into_response())
}
