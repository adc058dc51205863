//! Error types for the HTTP adapter.
//!
//! Every error renders as a small JSON body with a status and a stable code.
//!
//! # Error Mapping
//!
//! | Error | HTTP Status | Code |
//! |-------|-------------|------|
//! | NotFound | 404 | not-found |
//! | TenantMismatch | 400 | tenant-mismatch |
//!
//! `NotFound` carries no detail at all, so a missing file, a traversal
//! attempt, an unknown site and an unmatched route produce byte-identical
//! responses. Storage errors always convert to `NotFound`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use siteserve_storage::StorageError;
use std::fmt;

use crate::tenant::TenantMismatchError;

/// The primary error type for HTTP operations.
#[derive(Debug)]
pub enum RestError {
    /// Nothing to serve (HTTP 404). Deliberately carries no detail.
    NotFound,

    /// Site sources disagree under strict validation (HTTP 400).
    TenantMismatch(TenantMismatchError),
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::NotFound => write!(f, "Not found"),
            RestError::TenantMismatch(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for RestError {}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    status: u16,
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

impl RestError {
    /// Returns the HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound => StatusCode::NOT_FOUND,
            RestError::TenantMismatch(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Returns the stable error code placed in the body.
    pub fn code(&self) -> &'static str {
        match self {
            RestError::NotFound => "not-found",
            RestError::TenantMismatch(_) => "tenant-mismatch",
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            RestError::NotFound => None,
            RestError::TenantMismatch(_) => Some(self.to_string()),
        };

        let body = ErrorBody {
            status: status.as_u16(),
            error: self.code(),
            message: details.as_deref(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<TenantMismatchError> for RestError {
    fn from(err: TenantMismatchError) -> Self {
        RestError::TenantMismatch(err)
    }
}

// Storage failures are never distinguishable from a missing file.
impl From<StorageError> for RestError {
    fn from(_: StorageError) -> Self {
        RestError::NotFound
    }
}

/// Result type alias for HTTP operations.
pub type RestResult<T> = Result<T, RestError>;
