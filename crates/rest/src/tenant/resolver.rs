//! Site resolution from multiple sources.
//!
//! Provides the [`TenantResolver`] which picks the site a request is for
//! using the configured sources.

use axum::http::{HeaderName, header::HOST, request::Parts};
use siteserve_storage::TenantId;

use crate::config::{ServerConfig, TenantRoutingMode};

use super::source::TenantSource;
use super::validation::is_valid_site_name;

/// Header carrying an explicit site name.
pub static X_TENANT_ID: HeaderName = HeaderName::from_static("x-tenant-id");

/// Result of resolving a site from a request.
#[derive(Debug, Clone)]
pub struct ResolvedTenant {
    /// The resolved site.
    pub tenant_id: TenantId,
    /// The source from which the site was resolved.
    pub source: TenantSource,
    /// All request sources that named a site (for validation).
    pub all_sources: Vec<(TenantSource, TenantId)>,
}

impl ResolvedTenant {
    /// Returns true if the site was the default fallback.
    pub fn is_default(&self) -> bool {
        self.source.is_default()
    }

    /// Returns the site name as a string reference.
    pub fn tenant_id_str(&self) -> &str {
        self.tenant_id.as_str()
    }
}

/// Trait for extracting a site name from one part of a request.
pub trait TenantSourceExtractor: Send + Sync {
    /// Attempts to extract a site name from the request.
    fn extract(&self, parts: &Parts) -> Option<TenantId>;

    /// Returns the source type this extractor handles.
    fn source_type(&self) -> TenantSource;
}

/// Extracts the site from the X-Tenant-ID header.
#[derive(Debug, Default)]
pub struct HeaderTenantExtractor;

impl TenantSourceExtractor for HeaderTenantExtractor {
    fn extract(&self, parts: &Parts) -> Option<TenantId> {
        parts
            .headers
            .get(&X_TENANT_ID)
            .and_then(|v| v.to_str().ok())
            .filter(|s| is_valid_site_name(s))
            .map(TenantId::new)
    }

    fn source_type(&self) -> TenantSource {
        TenantSource::Header
    }
}

/// Extracts the site from the Host header, falling back to the URI
/// authority for absolute-form requests.
///
/// The port is stripped and the name lowercased, so `Acme.Example.com:8000`
/// selects the site `acme.example.com`.
#[derive(Debug, Default)]
pub struct HostTenantExtractor;

impl TenantSourceExtractor for HostTenantExtractor {
    fn extract(&self, parts: &Parts) -> Option<TenantId> {
        let raw = parts
            .headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| parts.uri.host())?;

        let host = strip_port(raw.trim()).to_ascii_lowercase();
        if !is_valid_site_name(&host) {
            return None;
        }
        Some(TenantId::new(host))
    }

    fn source_type(&self) -> TenantSource {
        TenantSource::Host
    }
}

/// Removes a trailing `:port` from a host. Bare IPv6 literals are left alone.
fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port))
            if !name.contains(':') && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) =>
        {
            name
        }
        _ => host,
    }
}

/// Resolves the site for a request.
pub struct TenantResolver {
    pinned: Option<TenantId>,
    default_tenant: Option<TenantId>,
    extractors: Vec<Box<dyn TenantSourceExtractor>>,
}

impl TenantResolver {
    /// Creates a new TenantResolver based on the server configuration.
    pub fn new(config: &ServerConfig) -> Self {
        let mut extractors: Vec<Box<dyn TenantSourceExtractor>> = Vec::new();

        // Add extractors based on routing mode (in priority order)
        match config.multitenancy.routing_mode {
            TenantRoutingMode::HostOnly => {
                extractors.push(Box::new(HostTenantExtractor));
            }
            TenantRoutingMode::HeaderOnly => {
                extractors.push(Box::new(HeaderTenantExtractor));
            }
            TenantRoutingMode::Both => {
                extractors.push(Box::new(HeaderTenantExtractor));
                extractors.push(Box::new(HostTenantExtractor));
            }
        }

        Self {
            pinned: config.site.as_deref().map(TenantId::new),
            default_tenant: config.default_tenant.as_deref().map(TenantId::new),
            extractors,
        }
    }

    /// Resolves the site for the request.
    ///
    /// Returns `None` when no source names a site and no default is
    /// configured.
    pub fn resolve(&self, parts: &Parts) -> Option<ResolvedTenant> {
        if let Some(site) = &self.pinned {
            return Some(ResolvedTenant {
                tenant_id: site.clone(),
                source: TenantSource::Pinned,
                all_sources: Vec::new(),
            });
        }

        let mut all_sources: Vec<_> = self
            .extractors
            .iter()
            .filter_map(|e| e.extract(parts).map(|t| (e.source_type(), t)))
            .collect();
        all_sources.sort_by(|a, b| b.0.cmp(&a.0));

        // Select the highest priority source that provided a site
        if let Some((source, tenant_id)) = all_sources.first().cloned() {
            return Some(ResolvedTenant {
                tenant_id,
                source,
                all_sources,
            });
        }

        self.default_tenant.clone().map(|tenant_id| ResolvedTenant {
            tenant_id,
            source: TenantSource::Default,
            all_sources,
        })
    }
}

impl Default for TenantResolver {
    fn default() -> Self {
        Self::new(&ServerConfig::default())
    }
}
