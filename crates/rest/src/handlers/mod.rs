//! HTTP request handlers.
//!
//! - [`files`] - Public file serving and the uniform not-found fallback
//! - [`health`] - Health, liveness and readiness endpoints

pub mod files;
pub mod health;

// Re-export handlers for convenience
pub use files::{not_found_handler, serve_file_handler};
pub use health::{health_handler, liveness_handler, readiness_handler};
