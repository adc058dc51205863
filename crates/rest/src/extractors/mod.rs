//! Axum extractors.
//!
//! - [`SiteExtractor`] - The site a request is for

pub mod site;

pub use site::SiteExtractor;
