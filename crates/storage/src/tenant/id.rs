//! Tenant identifier type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An opaque tenant (site) identifier.
///
/// # Examples
///
/// ```
/// use siteserve_storage::tenant::TenantId;
///
/// let tenant = TenantId::new("acme.example.com");
/// assert_eq!(tenant.as_str(), "acme.example.com");
/// assert!(tenant.is_path_safe());
/// assert!(!TenantId::new("../acme").is_path_safe());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a new tenant ID from the given string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the tenant ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if this id can be used as a single directory name.
    ///
    /// Rejects the empty string, `.` and `..`, anything containing a path
    /// separator (`/` or `\`) and anything containing a NUL byte.
    pub fn is_path_safe(&self) -> bool {
        let id = self.0.as_str();
        !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\', '\0'])
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TenantId({})", self.0)
    }
}

impl FromStr for TenantId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TenantId::new(s))
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        TenantId::new(s)
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        TenantId::new(s)
    }
}

impl AsRef<str> for TenantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_creation() {
        let tenant = TenantId::new("my-tenant");
        assert_eq!(tenant.as_str(), "my-tenant");
        assert_eq!(tenant.to_string(), "my-tenant");
        assert_eq!(format!("{:?}", tenant), "TenantId(my-tenant)");
    }

    #[test]
    fn test_path_safe_accepts_site_names() {
        assert!(TenantId::new("acme").is_path_safe());
        assert!(TenantId::new("acme.example.com").is_path_safe());
        assert!(TenantId::new("site_1-a").is_path_safe());
        // A leading dot is still a single component
        assert!(TenantId::new(".hidden").is_path_safe());
    }

    #[test]
    fn test_path_safe_rejects_traversal() {
        assert!(!TenantId::new("").is_path_safe());
        assert!(!TenantId::new(".").is_path_safe());
        assert!(!TenantId::new("..").is_path_safe());
        assert!(!TenantId::new("../other").is_path_safe());
        assert!(!TenantId::new("a/b").is_path_safe());
        assert!(!TenantId::new("a\\b").is_path_safe());
        assert!(!TenantId::new("acme\0").is_path_safe());
    }

    #[test]
    fn test_serde_transparent() {
        let tenant = TenantId::new("acme");
        let json = serde_json::to_string(&tenant).unwrap();
        assert_eq!(json, "\"acme\"");
        let back: TenantId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tenant);
    }
}
