//! Local filesystem backend.
//!
//! Wraps `tokio::fs` for host filesystem access.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::trace;

use crate::core::{FileKind, FileMetadata, FileStore, OpenedFile};
use crate::error::{StorageError, StorageResult};

/// [`FileStore`] over the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl LocalFileStore {
    /// Creates a new local file store.
    pub fn new() -> Self {
        Self
    }

    fn convert_metadata(md: &fs::Metadata) -> FileMetadata {
        let ft = md.file_type();
        let kind = if ft.is_file() {
            FileKind::File
        } else if ft.is_dir() {
            FileKind::Directory
        } else if ft.is_symlink() {
            FileKind::Symlink
        } else {
            FileKind::Other
        };

        FileMetadata {
            kind,
            len: md.len(),
        }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    fn backend_name(&self) -> &'static str {
        "local"
    }

    async fn canonicalize(&self, path: &Path) -> StorageResult<PathBuf> {
        tokio::fs::canonicalize(path)
            .await
            .map_err(|e| StorageError::from_io(e, path))
    }

    async fn metadata(&self, path: &Path) -> StorageResult<FileMetadata> {
        let md = tokio::fs::metadata(path)
            .await
            .map_err(|e| StorageError::from_io(e, path))?;
        Ok(Self::convert_metadata(&md))
    }

    async fn open(&self, path: &Path) -> StorageResult<OpenedFile> {
        let mut options = tokio::fs::OpenOptions::new();
        options.read(true);
        // A FIFO swapped in after the metadata check must not block the open,
        // and a final component swapped for a link must not be followed.
        #[cfg(unix)]
        options.custom_flags(libc::O_NONBLOCK | libc::O_NOFOLLOW | libc::O_CLOEXEC);

        let file = options
            .open(path)
            .await
            .map_err(|e| StorageError::from_io(e, path))?;

        // Stat the handle, not the path: whatever was opened is what gets streamed.
        let md = file
            .metadata()
            .await
            .map_err(|e| StorageError::from_io(e, path))?;
        if !md.file_type().is_file() {
            return Err(StorageError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        trace!(path = %path.display(), size = md.len(), "Opened file");
        Ok(OpenedFile {
            reader: Box::new(file),
            size: md.len(),
        })
    }
}
