//! Response building for served files.
//!
//! - [`headers`] - Content-Type, Content-Length and Content-Disposition

pub mod headers;

pub use headers::{FileHeaders, content_disposition, guess_content_type};
