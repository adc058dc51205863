//! Public file handler.
//!
//! Serves `GET|HEAD {files_prefix}/{*path}` for the requested site.

use std::panic::AssertUnwindSafe;

use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use futures::FutureExt;
use siteserve_storage::{FileStore, RequestPath, ResolutionOutcome, ServedFile};
use tokio_util::io::ReaderStream;
use tracing::{debug, error};

use crate::error::RestError;
use crate::extractors::SiteExtractor;
use crate::responses::FileHeaders;
use crate::state::AppState;

/// Handler for public file requests.
///
/// The path is taken from the raw request URI and percent-decoded here
/// rather than by a path extractor, so that undecodable paths reach the
/// resolver and fail like any other missing file.
///
/// # HTTP Request
///
/// `GET [files_prefix]/[path]`
///
/// # Response
///
/// - `200 OK` - The file, streamed, with Content-Type, Content-Length and
///   Content-Disposition
/// - `404 Not Found` - Every other case, with one fixed body
pub async fn serve_file_handler<S>(
    State(state): State<AppState<S>>,
    site: SiteExtractor,
    uri: Uri,
) -> Response
where
    S: FileStore + 'static,
{
    let Some(suffix) = request_suffix(uri.path(), state.files_prefix()) else {
        return RestError::NotFound.into_response();
    };
    let raw = RequestPath::from_percent_encoded(suffix);

    let outcome = AssertUnwindSafe(state.files().resolve(site.tenant_id(), &raw))
        .catch_unwind()
        .await;

    match outcome {
        Ok(ResolutionOutcome::Served(file)) => {
            debug!(site = %site, name = %file.name, size = file.size, "Serving file");
            file_response(file)
        }
        Ok(ResolutionOutcome::NotFound) => RestError::NotFound.into_response(),
        Err(_) => {
            error!(site = %site, "File resolution panicked");
            RestError::NotFound.into_response()
        }
    }
}

/// Handler for every route that matches nothing.
pub async fn not_found_handler() -> RestError {
    RestError::NotFound
}

/// Returns the still-encoded path below `prefix`, or `None` if `path` is not
/// below it.
fn request_suffix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    path.strip_prefix(prefix)?.strip_prefix('/')
}

fn file_response(file: ServedFile) -> Response {
    let headers = FileHeaders::for_file(&file.name, file.size).to_header_map();
    let body = Body::from_stream(ReaderStream::new(file.reader));
    (StatusCode::OK, headers, body).into_response()
}
