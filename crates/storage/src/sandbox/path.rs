//! Raw request paths.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

use percent_encoding::percent_decode_str;

use crate::error::{StorageError, StorageResult};

/// The untrusted path suffix of a file request, kept as raw bytes.
///
/// Nothing about the content is assumed: it may be empty, contain `..`
/// segments, start with `/`, hold NUL bytes or be invalid UTF-8.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RequestPath {
    raw: Vec<u8>,
}

impl RequestPath {
    /// Creates a request path from a string.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            raw: path.as_ref().as_bytes().to_vec(),
        }
    }

    /// Creates a request path from arbitrary bytes.
    pub fn from_bytes(raw: impl Into<Vec<u8>>) -> Self {
        Self { raw: raw.into() }
    }

    /// Creates a request path by decoding `%XX` escapes in a URL path.
    ///
    /// Decoding is byte-wise, so `%ff` or `%00` survive as the raw bytes they
    /// name and are rejected later by [`to_native`](Self::to_native).
    pub fn from_percent_encoded(encoded: &str) -> Self {
        Self {
            raw: percent_decode_str(encoded).collect(),
        }
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Returns `true` for the empty path.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// A lossy UTF-8 rendering, for logs.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.raw)
    }

    /// Coerces the raw bytes into a native relative (or absolute) path.
    ///
    /// On Unix any byte sequence without NUL is a valid path. Elsewhere the
    /// bytes must also be valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidPath` for embedded NUL bytes or an
    /// encoding the platform cannot represent.
    pub fn to_native(&self) -> StorageResult<PathBuf> {
        if self.raw.contains(&0) {
            return Err(StorageError::InvalidPath {
                reason: "embedded NUL byte".to_string(),
            });
        }
        native_path(&self.raw)
    }
}

#[cfg(unix)]
fn native_path(raw: &[u8]) -> StorageResult<PathBuf> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Ok(PathBuf::from(OsStr::from_bytes(raw)))
}

#[cfg(not(unix))]
fn native_path(raw: &[u8]) -> StorageResult<PathBuf> {
    std::str::from_utf8(raw)
        .map(PathBuf::from)
        .map_err(|e| StorageError::InvalidPath {
            reason: format!("not valid UTF-8: {}", e),
        })
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_lossy().escape_debug())
    }
}

impl fmt::Debug for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestPath(\"{}\")", self)
    }
}

impl From<&str> for RequestPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RequestPath {
    fn from(s: String) -> Self {
        Self { raw: s.into_bytes() }
    }
}
