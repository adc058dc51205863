//! Site (tenant) resolution.
//!
//! Every file request is served for exactly one site. The site name is the
//! directory under the storage root that holds the site's files, and is read
//! from one of these sources:
//!
//! - **Pinned site**: `--site` in configuration (single-site deployments)
//! - **X-Tenant-ID header**: explicit site selection by a trusted proxy
//! - **Host header**: the requested host name, port stripped, lowercased
//! - **Default tenant**: fallback from configuration
//!
//! # Resolution Priority
//!
//! When multiple sources provide a site, they are resolved in this priority
//! order (highest to lowest):
//!
//! 1. Pinned site (when set, no request source is consulted)
//! 2. X-Tenant-ID header
//! 3. Host header
//! 4. Default tenant from configuration
//!
//! # Configuration
//!
//! Which request sources are consulted is configured via [`TenantRoutingMode`]:
//!
//! - `HostOnly` (default): Only use the Host header
//! - `HeaderOnly`: Only use the X-Tenant-ID header
//! - `Both`: Support both, with the header taking precedence
//!
//! # Strict Validation
//!
//! When [`MultitenancyConfig::strict_validation`] is enabled, requests whose
//! header and Host header disagree are answered with `400 Bad Request`.
//!
//! [`TenantRoutingMode`]: crate::config::TenantRoutingMode
//! [`MultitenancyConfig::strict_validation`]: crate::config::MultitenancyConfig::strict_validation

mod resolver;
mod source;
mod validation;

pub use resolver::{
    HeaderTenantExtractor, HostTenantExtractor, ResolvedTenant, TenantResolver,
    TenantSourceExtractor, X_TENANT_ID,
};
pub use source::TenantSource;
pub use validation::{TenantMismatchError, TenantValidator, is_valid_site_name};
