//! Application state for the file server.
//!
//! This module defines the shared application state that is available to all
//! request handlers: the sandboxed file resolver, the site resolver and the
//! server configuration.

use std::sync::Arc;

use siteserve_storage::{FileStore, SiteFileResolver};

use crate::config::ServerConfig;
use crate::tenant::TenantResolver;

/// Shared application state.
///
/// # Type Parameters
///
/// * `S` - The file store backend (must implement [`FileStore`])
///
/// # Example
///
/// ```rust
/// use siteserve_rest::{AppState, ServerConfig};
/// use siteserve_storage::LocalFileStore;
///
/// let state = AppState::new(LocalFileStore::new(), ServerConfig::default());
/// assert_eq!(state.files_prefix(), "/files");
/// ```
pub struct AppState<S> {
    /// The sandboxed file resolver.
    files: Arc<SiteFileResolver<S>>,

    /// Picks the site for each request.
    tenants: Arc<TenantResolver>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            files: Arc::clone(&self.files),
            tenants: Arc::clone(&self.tenants),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: FileStore> AppState<S> {
    /// Creates a new AppState over `store` with the given configuration.
    pub fn new(store: S, config: ServerConfig) -> Self {
        let files = SiteFileResolver::new(store, config.storage_root.clone())
            .with_diagnostics(config.diagnostics());
        let tenants = TenantResolver::new(&config);

        Self {
            files: Arc::new(files),
            tenants: Arc::new(tenants),
            config: Arc::new(config),
        }
    }

    /// Returns the file resolver.
    pub fn files(&self) -> &SiteFileResolver<S> {
        &self.files
    }

    /// Returns the site resolver.
    pub fn tenant_resolver(&self) -> &TenantResolver {
        &self.tenants
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the URL prefix for public files.
    pub fn files_prefix(&self) -> &str {
        &self.config.files_prefix
    }

    /// Returns whether conflicting site sources are rejected.
    pub fn strict_validation(&self) -> bool {
        self.config.multitenancy.strict_validation
    }

    /// Returns the file store backend name.
    pub fn backend_name(&self) -> &'static str {
        self.files.store().backend_name()
    }
}
