//! Shared fixtures for storage integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::io::AsyncReadExt;

use siteserve_storage::{LocalFileStore, ResolutionOutcome, SiteFileResolver};

/// Bytes of `tenantA/public/files/img/logo.png`.
pub const LOGO_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nlogo";

/// A temporary storage tree:
///
/// ```text
/// <temp>/
/// ├── outside/etc/passwd
/// └── sites/
///     ├── tenantA/
///     │   ├── private/secret.txt
///     │   ├── public/files/img/logo.png
///     │   ├── public/files/docs/report.pdf
///     │   └── public/files-evil/secret.txt
///     └── tenantB/public/files/img/b-only.png
/// ```
pub struct StorageTree {
    pub temp: TempDir,
}

impl StorageTree {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let base = temp.path();

        write(&base.join("outside/etc/passwd"), b"root:x:0:0");
        write(&base.join("sites/tenantA/private/secret.txt"), b"private");
        write(&base.join("sites/tenantA/public/files/img/logo.png"), LOGO_BYTES);
        write(&base.join("sites/tenantA/public/files/docs/report.pdf"), b"%PDF-1.7");
        write(&base.join("sites/tenantA/public/files-evil/secret.txt"), b"evil");
        write(&base.join("sites/tenantB/public/files/img/b-only.png"), b"tenant b");

        Self { temp }
    }

    pub fn base(&self) -> &Path {
        self.temp.path()
    }

    pub fn storage_root(&self) -> PathBuf {
        self.temp.path().join("sites")
    }

    pub fn files_dir(&self, tenant: &str) -> PathBuf {
        self.storage_root().join(tenant).join("public/files")
    }

    pub fn resolver(&self) -> SiteFileResolver<LocalFileStore> {
        SiteFileResolver::new(LocalFileStore::new(), self.storage_root())
    }
}

fn write(path: &Path, bytes: &[u8]) {
    fs::create_dir_all(path.parent().expect("fixture path has a parent"))
        .expect("Failed to create fixture dir");
    fs::write(path, bytes).expect("Failed to write fixture file");
}

/// Unwraps a served outcome into `(name, body)`.
pub async fn read_served(outcome: ResolutionOutcome) -> (String, Vec<u8>) {
    let mut file = match outcome {
        ResolutionOutcome::Served(file) => file,
        ResolutionOutcome::NotFound => panic!("Expected Served, got NotFound"),
    };
    let mut body = Vec::new();
    file.reader
        .read_to_end(&mut body)
        .await
        .expect("Failed to read served file");
    (file.name, body)
}
