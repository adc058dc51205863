//! siteserve Storage Layer
//!
//! This crate provides tenant-scoped access to uploaded files on a shared
//! filesystem tree, and the sandbox resolver that turns an untrusted request
//! path into a file that is guaranteed to live inside its tenant's directory.
//!
//! # Layout on disk
//!
//! Every tenant (site) owns one public files directory:
//!
//! ```text
//! <storage-root>/
//! ├── acme.example.com/
//! │   └── public/files/        <- tenant root for "acme.example.com"
//! │       └── img/logo.png
//! └── globex.example.com/
//!     └── public/files/
//! ```
//!
//! # Architecture
//!
//! - [`tenant`] - Tenant identifiers
//! - [`core`] - The [`FileStore`] trait, the filesystem seam used by the resolver
//! - [`backends`] - Concrete stores ([`LocalFileStore`] over `tokio::fs`)
//! - [`sandbox`] - [`SiteFileResolver`], the path resolver and sandbox guard
//! - [`error`] - Storage error types
//!
//! # Failure surface
//!
//! The resolver never reports *why* a request failed. Missing files, traversal
//! attempts, malformed input, directories, permission errors and races all
//! collapse into [`ResolutionOutcome::NotFound`]. Detail is only available
//! through the optional [`Diagnostics`] log channel.
//!
//! # Example
//!
//! ```no_run
//! use siteserve_storage::{LocalFileStore, RequestPath, ResolutionOutcome, SiteFileResolver};
//!
//! # async fn demo() {
//! let resolver = SiteFileResolver::new(LocalFileStore::new(), "/srv/sites");
//! match resolver.resolve("acme", &RequestPath::new("img/logo.png")).await {
//!     ResolutionOutcome::Served(file) => println!("serving {} ({} bytes)", file.name, file.size),
//!     ResolutionOutcome::NotFound => println!("404"),
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod sandbox;
pub mod tenant;

// Re-export commonly used types at crate root
pub use backends::LocalFileStore;
pub use core::{FileKind, FileMetadata, FileReader, FileStore, OpenedFile};
pub use error::{StorageError, StorageResult};
pub use sandbox::{
    Diagnostics, Rejection, RequestPath, ResolutionOutcome, ServedFile, SiteFileResolver,
    TenantRoot,
};
pub use tenant::TenantId;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
