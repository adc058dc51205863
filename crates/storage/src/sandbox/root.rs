//! Tenant root directories.

use std::path::{Component, Path, PathBuf};

use crate::error::{StorageError, StorageResult};
use crate::tenant::TenantId;

/// The directory every file served for one tenant must live under:
/// `<storage-root>/<tenant>/public/files`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantRoot {
    tenant: TenantId,
    path: PathBuf,
}

impl TenantRoot {
    /// Builds the tenant root below `storage_root`.
    ///
    /// The result is lexically normalized. No filesystem access happens here.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidPath` if the tenant id is not exactly one
    /// normal path component (see [`TenantId::is_path_safe`]).
    pub fn new(storage_root: impl AsRef<Path>, tenant: &TenantId) -> StorageResult<Self> {
        if !tenant.is_path_safe() {
            return Err(StorageError::InvalidPath {
                reason: format!("tenant id {:?} is not a single path component", tenant.as_str()),
            });
        }

        Ok(Self {
            tenant: tenant.clone(),
            path: layout(storage_root.as_ref(), tenant),
        })
    }

    /// The tenant this root belongs to.
    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    /// The normalized (not canonicalized) root path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The same tenant root below another storage root, typically the
    /// canonical form of the one it was built from.
    pub fn relocated(&self, storage_root: &Path) -> Self {
        Self {
            tenant: self.tenant.clone(),
            path: layout(storage_root, &self.tenant),
        }
    }
}

fn layout(storage_root: &Path, tenant: &TenantId) -> PathBuf {
    let joined = storage_root
        .join(tenant.as_str())
        .join("public")
        .join("files");
    normalize_lexically(&joined)
}

/// Collapses `.` and `..` components without touching the filesystem.
///
/// A `..` directly after the root (or at the start of a relative path that
/// has nothing left to pop) is kept.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}
