//! Site extractor.
//!
//! Resolves the site a request is for and, in strict mode, checks that the
//! request's sources agree.

use axum::{extract::FromRequestParts, http::request::Parts};
use siteserve_storage::FileStore;
use tracing::{debug, warn};

use crate::error::RestError;
use crate::state::AppState;
use crate::tenant::{ResolvedTenant, TenantSource, TenantValidator};

/// Axum extractor for the requested site.
///
/// Rejects with [`RestError::NotFound`] when no site can be determined, and
/// with [`RestError::TenantMismatch`] when strict validation is on and the
/// sources disagree.
///
/// # Example
///
/// ```rust,ignore
/// use siteserve_rest::extractors::SiteExtractor;
///
/// async fn handler(site: SiteExtractor) {
///     println!("Site: {} (from {})", site.tenant_id(), site.source());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SiteExtractor {
    resolved: ResolvedTenant,
}

impl SiteExtractor {
    /// Returns the site name.
    pub fn tenant_id(&self) -> &str {
        self.resolved.tenant_id_str()
    }

    /// Returns where the site name came from.
    pub fn source(&self) -> TenantSource {
        self.resolved.source
    }

    /// Returns the full resolution result.
    pub fn resolved(&self) -> &ResolvedTenant {
        &self.resolved
    }
}

impl std::fmt::Display for SiteExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tenant_id())
    }
}

impl<S> FromRequestParts<AppState<S>> for SiteExtractor
where
    S: FileStore + 'static,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        let Some(resolved) = state.tenant_resolver().resolve(parts) else {
            debug!("No site for request");
            return Err(RestError::NotFound);
        };

        if state.strict_validation() {
            TenantValidator::validate_consistency(&resolved).map_err(|err| {
                warn!(error = %err, "Rejecting request with conflicting site sources");
                RestError::from(err)
            })?;
        }

        debug!(
            site = resolved.tenant_id_str(),
            source = %resolved.source,
            fallback = resolved.is_default(),
            "Resolved site"
        );
        Ok(Self { resolved })
    }
}
