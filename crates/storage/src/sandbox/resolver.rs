//! The site file resolver.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::instrument;

use super::diagnostics::{Diagnostics, Rejection};
use super::outcome::{ResolutionOutcome, ServedFile};
use super::path::RequestPath;
use super::root::TenantRoot;
use crate::core::FileStore;
use crate::error::StorageError;
use crate::tenant::TenantId;

/// Resolves tenant file requests against a shared storage root.
///
/// The resolver holds no per-request state and never writes to the
/// filesystem, so one instance can serve any number of concurrent requests.
///
/// # Example
///
/// ```no_run
/// use siteserve_storage::{Diagnostics, LocalFileStore, RequestPath, SiteFileResolver};
///
/// # async fn demo() {
/// let resolver = SiteFileResolver::new(LocalFileStore::new(), "/srv/sites")
///     .with_diagnostics(Diagnostics::off().with_audit_rejections(true));
///
/// let outcome = resolver
///     .resolve("acme", &RequestPath::new("../../../etc/passwd"))
///     .await;
/// assert!(outcome.is_not_found());
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SiteFileResolver<S> {
    store: S,
    storage_root: PathBuf,
    diagnostics: Diagnostics,
}

/// A rejection plus the detail that only diagnostics get to see.
struct Refusal {
    rejection: Rejection,
    detail: String,
}

impl Refusal {
    fn new(rejection: Rejection, detail: impl fmt::Display) -> Self {
        Self {
            rejection,
            detail: detail.to_string(),
        }
    }

    fn storage(rejection: Rejection) -> impl FnOnce(StorageError) -> Self {
        move |err| Self::new(rejection, err)
    }
}

impl<S: FileStore> SiteFileResolver<S> {
    /// Creates a resolver over `store` rooted at `storage_root`.
    pub fn new(store: S, storage_root: impl Into<PathBuf>) -> Self {
        Self {
            store,
            storage_root: storage_root.into(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Replaces the diagnostics settings.
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The storage root all tenant roots live under.
    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    /// The active diagnostics settings.
    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    /// The underlying file store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves `raw` for `tenant_id`.
    ///
    /// Returns [`ResolutionOutcome::Served`] only for an existing regular file
    /// whose canonical path lies inside the tenant root, taken below the
    /// canonical storage root. Every other case,
    /// including I/O errors and races, is [`ResolutionOutcome::NotFound`].
    #[instrument(name = "resolve", skip_all, level = "trace")]
    pub async fn resolve(&self, tenant_id: &str, raw: &RequestPath) -> ResolutionOutcome {
        match self.try_resolve(tenant_id, raw).await {
            Ok(file) => ResolutionOutcome::Served(file),
            Err(refusal) => {
                self.diagnostics
                    .record(tenant_id, raw, refusal.rejection, &refusal.detail);
                ResolutionOutcome::NotFound
            }
        }
    }

    async fn try_resolve(&self, tenant_id: &str, raw: &RequestPath) -> Result<ServedFile, Refusal> {
        let tenant = TenantId::new(tenant_id);
        let root = TenantRoot::new(&self.storage_root, &tenant)
            .map_err(Refusal::storage(Rejection::InvalidTenant))?;

        let relative = raw
            .to_native()
            .map_err(Refusal::storage(Rejection::MalformedPath))?;

        // Only the storage root is canonicalized. Links at or below the
        // tenant directory must not move the sandbox.
        let real_storage_root = self
            .store
            .canonicalize(&self.storage_root)
            .await
            .map_err(Refusal::storage(Rejection::Unresolvable))?;
        let root = root.relocated(&real_storage_root);

        let resolved = self
            .store
            .canonicalize(&root.path().join(&relative))
            .await
            .map_err(Refusal::storage(Rejection::Unresolvable))?;

        if !resolved.starts_with(root.path()) {
            return Err(Refusal::new(
                Rejection::OutsideRoot,
                format_args!("{} is outside {}", resolved.display(), root.path().display()),
            ));
        }

        let metadata = self
            .store
            .metadata(&resolved)
            .await
            .map_err(Refusal::storage(Rejection::Unresolvable))?;
        if !metadata.is_file() {
            return Err(Refusal::new(
                Rejection::NotARegularFile,
                format_args!("{} is a {:?}", resolved.display(), metadata.kind),
            ));
        }

        let name = match resolved.file_name() {
            Some(name) => name.to_string_lossy().into_owned(),
            None => {
                return Err(Refusal::new(
                    Rejection::NotARegularFile,
                    format_args!("{} has no file name", resolved.display()),
                ));
            }
        };

        let opened = self
            .store
            .open(&resolved)
            .await
            .map_err(Refusal::storage(Rejection::OpenFailed))?;

        Ok(ServedFile {
            name,
            path: resolved,
            size: opened.size,
            reader: opened.reader,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::LocalFileStore;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    fn setup() -> (TempDir, SiteFileResolver<LocalFileStore>) {
        let temp = TempDir::new().unwrap();
        let files = temp.path().join("acme/public/files/img");
        std::fs::create_dir_all(&files).unwrap();
        std::fs::write(files.join("logo.png"), b"PNG").unwrap();
        let resolver = SiteFileResolver::new(LocalFileStore::new(), temp.path());
        (temp, resolver)
    }

    #[tokio::test]
    async fn test_serves_file() {
        let (_temp, resolver) = setup();

        let file = resolver
            .resolve("acme", &RequestPath::new("img/logo.png"))
            .await
            .into_served()
            .unwrap();
        assert_eq!(file.name, "logo.png");
        assert_eq!(file.size, 3);

        let mut reader = file.reader;
        let mut body = Vec::new();
        reader.read_to_end(&mut body).await.unwrap();
        assert_eq!(body, b"PNG");
    }

    #[tokio::test]
    async fn test_traversal_not_found() {
        let (_temp, resolver) = setup();
        let outcome = resolver
            .resolve("acme", &RequestPath::new("img/../../../../etc/hosts"))
            .await;
        assert!(outcome.is_not_found());
    }

    #[tokio::test]
    async fn test_directory_not_found() {
        let (_temp, resolver) = setup();
        assert!(resolver.resolve("acme", &RequestPath::new("img")).await.is_not_found());
        assert!(resolver.resolve("acme", &RequestPath::new("")).await.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_tenant_not_found() {
        let (_temp, resolver) = setup();
        for tenant in ["", "..", "acme/public"] {
            let outcome = resolver.resolve(tenant, &RequestPath::new("img/logo.png")).await;
            assert!(outcome.is_not_found(), "tenant {:?}", tenant);
        }
    }

    #[tokio::test]
    async fn test_accessors() {
        let (temp, resolver) = setup();
        let resolver = resolver.with_diagnostics(Diagnostics::off().with_developer_mode(true));
        assert_eq!(resolver.storage_root(), temp.path());
        assert!(resolver.diagnostics().developer_mode);
        assert_eq!(resolver.store().backend_name(), "local");
    }
}
