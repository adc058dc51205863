//! Temporary storage trees.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Bytes of `acme.test/public/files/img/logo.png`.
pub const LOGO_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nacme-logo";

/// A temporary storage tree with two sites:
///
/// ```text
/// <temp>/
/// ├── secret.txt
/// └── sites/
///     ├── acme.test/
///     │   ├── private/backup.sql
///     │   └── public/files/
///     │       ├── img/logo.png
///     │       └── docs/annual report.pdf
///     └── globex.test/public/files/img/globex.png
/// ```
pub struct SiteTree {
    pub temp: TempDir,
}

impl SiteTree {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let base = temp.path();

        write(&base.join("secret.txt"), b"top secret");
        write(&base.join("sites/acme.test/private/backup.sql"), b"DROP TABLE");
        write(&base.join("sites/acme.test/public/files/img/logo.png"), LOGO_BYTES);
        write(
            &base.join("sites/acme.test/public/files/docs/annual report.pdf"),
            b"%PDF-1.7",
        );
        write(&base.join("sites/globex.test/public/files/img/globex.png"), b"globex");

        Self { temp }
    }

    pub fn base(&self) -> &Path {
        self.temp.path()
    }

    pub fn storage_root(&self) -> PathBuf {
        self.temp.path().join("sites")
    }

    pub fn files_dir(&self, site: &str) -> PathBuf {
        self.storage_root().join(site).join("public/files")
    }
}

fn write(path: &Path, bytes: &[u8]) {
    fs::create_dir_all(path.parent().expect("fixture path has a parent"))
        .expect("Failed to create fixture dir");
    fs::write(path, bytes).expect("Failed to write fixture file");
}
