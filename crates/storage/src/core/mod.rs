//! Core storage traits and abstractions.
//!
//! The sandbox resolver needs exactly three filesystem primitives, and this
//! module names them as one trait so that tests (and future backends) can
//! substitute their own implementation:
//!
//! - canonicalize a path, resolving `.`/`..` and symlinks
//! - stat a path ([`FileMetadata`])
//! - open a regular file for streaming ([`OpenedFile`])
//!
//! Every failure is a [`StorageError`](crate::error::StorageError); no raw
//! `io::Error` escapes a [`FileStore`].

mod store;

pub use store::{FileKind, FileMetadata, FileReader, FileStore, OpenedFile};
