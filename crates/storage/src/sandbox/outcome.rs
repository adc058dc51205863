//! Resolution outcomes.

use std::fmt;
use std::path::PathBuf;

use crate::core::FileReader;

/// A file that passed every sandbox check and is open for streaming.
pub struct ServedFile {
    /// Final component of the canonical path; use this as the download name.
    pub name: String,
    /// Canonical path of the file. Never send this to a client.
    pub path: PathBuf,
    /// Size in bytes at open time.
    pub size: u64,
    /// The open byte stream.
    pub reader: FileReader,
}

impl fmt::Debug for ServedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServedFile")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// The closed set of results of [`SiteFileResolver::resolve`](super::SiteFileResolver::resolve).
#[derive(Debug)]
pub enum ResolutionOutcome {
    /// The file is confined to the tenant root and ready to stream.
    Served(ServedFile),
    /// Anything else.
    NotFound,
}

impl ResolutionOutcome {
    /// Returns `true` if a file was served.
    pub fn is_served(&self) -> bool {
        matches!(self, ResolutionOutcome::Served(_))
    }

    /// Returns `true` for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolutionOutcome::NotFound)
    }

    /// Consumes the outcome, returning the served file if any.
    pub fn into_served(self) -> Option<ServedFile> {
        match self {
            ResolutionOutcome::Served(file) => Some(file),
            ResolutionOutcome::NotFound => None,
        }
    }
}
