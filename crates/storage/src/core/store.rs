//! The [`FileStore`] trait.

use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::error::StorageResult;

/// A readable byte stream for an opened file.
pub type FileReader = Box<dyn AsyncRead + Send + Unpin>;

/// The type of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// A symbolic link (only reported when the link itself is inspected).
    Symlink,
    /// Devices, sockets, FIFOs and anything else.
    Other,
}

/// The subset of file metadata the resolver relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// Entry type.
    pub kind: FileKind,
    /// Size in bytes.
    pub len: u64,
}

impl FileMetadata {
    /// Returns `true` if this entry is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }
}

/// A file opened for streaming.
pub struct OpenedFile {
    /// The byte stream.
    pub reader: FileReader,
    /// Size of the file at the time it was opened.
    pub size: u64,
}

impl fmt::Debug for OpenedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenedFile")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Read-only access to the filesystem tree holding tenant files.
///
/// Implementations must never create, modify or delete anything.
///
/// # Example
///
/// ```ignore
/// use siteserve_storage::{FileStore, LocalFileStore};
///
/// async fn size_of<S: FileStore>(store: &S, path: &std::path::Path) -> Option<u64> {
///     let real = store.canonicalize(path).await.ok()?;
///     store.metadata(&real).await.ok().filter(|m| m.is_file()).map(|m| m.len)
/// }
/// ```
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Returns a human-readable name for this store.
    fn backend_name(&self) -> &'static str;

    /// Returns the absolute, symlink-free form of `path`.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotFound` - if any component does not exist
    /// * `StorageError::InvalidPath` - if the OS rejects the path
    async fn canonicalize(&self, path: &Path) -> StorageResult<PathBuf>;

    /// Returns metadata for `path`, following symlinks.
    async fn metadata(&self, path: &Path) -> StorageResult<FileMetadata>;

    /// Opens the regular file at `path` for reading.
    ///
    /// # Errors
    ///
    /// * `StorageError::NotAFile` - if the opened entry is not a regular file
    /// * `StorageError::NotFound` - if the file vanished before it could be opened
    async fn open(&self, path: &Path) -> StorageResult<OpenedFile>;
}
