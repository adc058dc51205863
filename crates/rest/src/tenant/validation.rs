//! Site name rules and strict-mode validation.

use siteserve_storage::TenantId;

use super::resolver::ResolvedTenant;
use super::source::TenantSource;

/// Longest accepted site name (the DNS name limit).
const MAX_SITE_NAME_LEN: usize = 253;

/// Returns `true` if `name` can be used as a site directory name.
///
/// Site names are host names: ASCII letters, digits, `.`, `-` and `_`, at
/// most 253 bytes, and never `.` or `..`.
pub fn is_valid_site_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_SITE_NAME_LEN
        && name != "."
        && name != ".."
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_'))
}

/// Error when site sources disagree in strict validation mode.
#[derive(Debug, Clone)]
pub struct TenantMismatchError {
    /// The site from the primary source.
    pub primary_tenant: TenantId,
    /// The primary source.
    pub primary_source: TenantSource,
    /// Conflicting site.
    pub conflicting_tenant: TenantId,
    /// Source of the conflicting site.
    pub conflicting_source: TenantSource,
}

impl std::fmt::Display for TenantMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tenant mismatch: {} from {} conflicts with {} from {}",
            self.primary_tenant.as_str(),
            self.primary_source,
            self.conflicting_tenant.as_str(),
            self.conflicting_source
        )
    }
}

impl std::error::Error for TenantMismatchError {}

/// Validates site consistency across sources.
pub struct TenantValidator;

impl TenantValidator {
    /// Validates that all sources agree on the site.
    ///
    /// # Returns
    ///
    /// `Ok(())` if validation passes, or `Err(TenantMismatchError)` if
    /// sources disagree.
    pub fn validate_consistency(resolved: &ResolvedTenant) -> Result<(), TenantMismatchError> {
        let Some((primary_source, primary_tenant)) = resolved.all_sources.first() else {
            return Ok(());
        };

        for (source, tenant_id) in resolved.all_sources.iter().skip(1) {
            if tenant_id.as_str() != primary_tenant.as_str() {
                return Err(TenantMismatchError {
                    primary_tenant: primary_tenant.clone(),
                    primary_source: *primary_source,
                    conflicting_tenant: tenant_id.clone(),
                    conflicting_source: *source,
                });
            }
        }

        Ok(())
    }
}
