//! Route configuration for the file server.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod file_routes;

pub use file_routes::create_routes;
