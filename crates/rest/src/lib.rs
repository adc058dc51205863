//! # siteserve-rest - HTTP adapter for per-site public files
//!
//! This crate puts the sandboxed resolver from `siteserve-storage` behind an
//! [axum](https://docs.rs/axum) router. Many sites share one storage tree;
//! each request is mapped to a site, and the rest of its path is resolved
//! inside that site's `public/files` directory and nowhere else.
//!
//! ## Features
//!
//! - **Sandboxed serving**: traversal, symlink escapes, encoded dot segments
//!   and malformed bytes are all contained by the resolver
//! - **One failure surface**: every failure is the same 404, byte for byte
//! - **Multi-site**: site taken from the Host header, `X-Tenant-ID`, or a
//!   pinned configuration value
//! - **Streaming**: files are streamed, never buffered whole
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use siteserve_rest::{create_app_with_config, ServerConfig};
//! use siteserve_storage::LocalFileStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig {
//!         storage_root: "/srv/sites".into(),
//!         ..Default::default()
//!     };
//!
//!     let app = create_app_with_config(LocalFileStore::new(), config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | HTTP Method | URL Pattern |
//! |----------|-------------|-------------|
//! | public file | GET, HEAD | `/files/[path]` |
//! | health | GET | `/health` |
//! | liveness | GET | `/_liveness` |
//! | readiness | GET | `/_readiness` |
//!
//! The `/files` prefix is configurable.
//!
//! ## Responses
//!
//! | HTTP Status | When |
//! |-------------|------|
//! | 200 | File served |
//! | 400 | Strict validation: header and host name different sites |
//! | 404 | Anything else: missing, traversal, directory, malformed, unknown site, unmatched route |
//! | 405 | Method other than GET/HEAD on a file path |
//! | 408 | Request timeout |
//!
//! The 404 body is always `{"status":404,"error":"not-found"}`.
//!
//! ## Architecture
//!
//! - [`error`] - Error types and their HTTP rendering
//! - [`config`] - Server configuration
//! - [`state`] - Application state (resolvers, configuration)
//! - [`tenant`] - Site resolution from host, header or configuration
//! - [`extractors`] - Axum extractors
//! - [`handlers`] - HTTP request handlers
//! - [`responses`] - Response header generation
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;
pub mod tenant;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use axum::{
    Router,
    extract::{MatchedPath, Request},
    http::{HeaderValue, Method},
};
use siteserve_storage::FileStore;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// This is a convenience function that creates the app with default settings.
/// For more control, use [`create_app_with_config`].
///
/// # Example
///
/// ```rust
/// use siteserve_rest::create_app;
/// use siteserve_storage::LocalFileStore;
///
/// let app = create_app(LocalFileStore::new());
/// ```
pub fn create_app<S>(store: S) -> Router
where
    S: FileStore + 'static,
{
    create_app_with_config(store, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// This function sets up the routes, the tracing and timeout middleware,
/// and optionally CORS and request IDs.
pub fn create_app_with_config<S>(store: S, config: ServerConfig) -> Router
where
    S: FileStore + 'static,
{
    info!(
        backend = store.backend_name(),
        storage_root = %config.storage_root.display(),
        files_prefix = %config.files_prefix,
        "Creating file server"
    );

    // Create application state
    let state = AppState::new(store, config.clone());

    // Build the router with all routes
    let router = routing::file_routes::create_routes(state);

    // Build middleware stack. Spans record the route template, never the raw path.
    let service_builder = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);
                tracing::info_span!("http_request", method = %request.method(), matched_path)
            }),
        )
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Add request IDs if enabled
    let router = if config.enable_request_id {
        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
///
/// Files are read-only, so only GET and HEAD are ever allowed.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD])
        .allow_headers(Any);

    if config.cors_origins == "*" {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level` when set.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "siteserve={level},siteserve_rest={level},siteserve_storage={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
