//! Tenant source identification.
//!
//! Defines the sources from which the site name can be taken.

use std::fmt;

/// Source from which the site name was taken.
///
/// Sources are listed in priority order (highest to lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenantSource {
    /// Site pinned in configuration (highest priority).
    Pinned,
    /// Site taken from the X-Tenant-ID header.
    Header,
    /// Site taken from the Host header or URI authority.
    Host,
    /// Default tenant from configuration (lowest priority).
    Default,
}

impl TenantSource {
    /// Returns the priority of this source (higher = more authoritative).
    pub fn priority(&self) -> u8 {
        match self {
            TenantSource::Pinned => 4,
            TenantSource::Header => 3,
            TenantSource::Host => 2,
            TenantSource::Default => 1,
        }
    }

    /// Returns true if this source is the default fallback.
    pub fn is_default(&self) -> bool {
        matches!(self, TenantSource::Default)
    }
}

impl fmt::Display for TenantSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenantSource::Pinned => write!(f, "pinned"),
            TenantSource::Header => write!(f, "header"),
            TenantSource::Host => write!(f, "host"),
            TenantSource::Default => write!(f, "default"),
        }
    }
}

impl Ord for TenantSource {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority().cmp(&other.priority())
    }
}

impl PartialOrd for TenantSource {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
