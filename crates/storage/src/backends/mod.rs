//! File store backends.
//!
//! - [`local`] - Host filesystem via `tokio::fs`

pub mod local;

pub use local::LocalFileStore;
