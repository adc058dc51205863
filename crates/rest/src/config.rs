//! Server configuration.
//!
//! Every option can be set on the command line or through an environment
//! variable.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SITESERVE_PORT` | 8000 | Server port |
//! | `SITESERVE_HOST` | 127.0.0.1 | Host to bind |
//! | `SITESERVE_LOG_LEVEL` | info | Log level |
//! | `SITESERVE_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `SITESERVE_STORAGE_ROOT` | sites | Directory holding one folder per site |
//! | `SITESERVE_FILES_PREFIX` | /files | URL prefix for public files |
//! | `SITESERVE_SITE` | (none) | Serve a single pinned site, ignoring request hosts |
//! | `SITESERVE_DEFAULT_TENANT` | (none) | Site used when a request names none |
//! | `SITESERVE_ROUTING_MODE` | host | Where to read the site from: host, header, both |
//! | `SITESERVE_STRICT_TENANT` | false | Reject requests whose sources disagree |
//! | `SITESERVE_DEVELOPER_MODE` | false | Log rejected file requests at debug |
//! | `SITESERVE_AUDIT_REJECTIONS` | false | Log suspicious file requests at warn |
//! | `SITESERVE_ENABLE_CORS` | false | Enable CORS |
//! | `SITESERVE_CORS_ORIGINS` | * | Allowed origins |
//! | `SITESERVE_ENABLE_REQUEST_ID` | true | Set and propagate `x-request-id` |
//!
//! # Example
//!
//! ```rust
//! use siteserve_rest::ServerConfig;
//!
//! // Create from environment
//! let config = ServerConfig::from_env();
//!
//! // Or create programmatically
//! let config = ServerConfig {
//!     port: 3000,
//!     storage_root: "/srv/sites".into(),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use siteserve_storage::Diagnostics;

use crate::tenant::is_valid_site_name;

/// Which parts of a request may name the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TenantRoutingMode {
    /// The `Host` header (port stripped, lowercased).
    #[default]
    #[value(name = "host")]
    HostOnly,
    /// The `X-Tenant-ID` header.
    #[value(name = "header")]
    HeaderOnly,
    /// Both; the header wins when present.
    #[value(name = "both")]
    Both,
}

/// Site resolution settings.
#[derive(Debug, Clone, Default, Args)]
pub struct MultitenancyConfig {
    /// Where to read the site name from.
    #[arg(long, env = "SITESERVE_ROUTING_MODE", value_enum, default_value_t = TenantRoutingMode::HostOnly)]
    pub routing_mode: TenantRoutingMode,

    /// Reject requests whose site sources disagree with 400.
    #[arg(long = "strict-tenant", env = "SITESERVE_STRICT_TENANT", default_value = "false")]
    pub strict_validation: bool,
}

/// Server configuration for the file server.
///
/// This struct can be constructed from environment variables using [`ServerConfig::from_env`],
/// from command line arguments using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "siteserve")]
#[command(about = "Serves per-site uploaded files from a shared storage tree")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "SITESERVE_PORT", default_value = "8000")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "SITESERVE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "SITESERVE_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "SITESERVE_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Directory holding one folder per site.
    #[arg(long, env = "SITESERVE_STORAGE_ROOT", default_value = "sites")]
    pub storage_root: PathBuf,

    /// URL prefix under which public files are served.
    #[arg(long, env = "SITESERVE_FILES_PREFIX", default_value = "/files")]
    pub files_prefix: String,

    /// Serve this site for every request, ignoring request hosts and headers.
    #[arg(long, env = "SITESERVE_SITE")]
    pub site: Option<String>,

    /// Site used when a request does not name one.
    #[arg(long, env = "SITESERVE_DEFAULT_TENANT")]
    pub default_tenant: Option<String>,

    /// Site resolution settings.
    #[command(flatten)]
    pub multitenancy: MultitenancyConfig,

    /// Log every rejected file request at debug level, with the underlying error.
    #[arg(long, env = "SITESERVE_DEVELOPER_MODE", default_value = "false")]
    pub developer_mode: bool,

    /// Log traversal attempts and malformed paths at warn level.
    #[arg(long, env = "SITESERVE_AUDIT_REJECTIONS", default_value = "false")]
    pub audit_rejections: bool,

    /// Enable CORS.
    #[arg(long, env = "SITESERVE_ENABLE_CORS", default_value = "false")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "SITESERVE_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Enable request ID tracking.
    #[arg(long, env = "SITESERVE_ENABLE_REQUEST_ID", default_value = "true")]
    pub enable_request_id: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            storage_root: PathBuf::from("sites"),
            files_prefix: "/files".to_string(),
            site: None,
            default_tenant: None,
            multitenancy: MultitenancyConfig::default(),
            developer_mode: false,
            audit_rejections: false,
            enable_cors: false,
            cors_origins: "*".to_string(),
            enable_request_id: true,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// This is a convenience method that parses environment variables without
    /// requiring command line arguments.
    pub fn from_env() -> Self {
        // Try to parse from environment, falling back to defaults
        Self::try_parse().unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the resolver diagnostics settings.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::off()
            .with_developer_mode(self.developer_mode)
            .with_audit_rejections(self.audit_rejections)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.storage_root.as_os_str().is_empty() {
            errors.push("Storage root cannot be empty".to_string());
        }

        if !self.files_prefix.starts_with('/') {
            errors.push("Files prefix must start with '/'".to_string());
        }

        if self.files_prefix.ends_with('/') {
            errors.push("Files prefix must not end with '/'".to_string());
        }

        if self.files_prefix.contains(['{', '}', '*']) {
            errors.push("Files prefix must not contain route parameters".to_string());
        }

        if let Some(site) = &self.site
            && !is_valid_site_name(site)
        {
            errors.push(format!("Invalid site name: {:?}", site));
        }

        if let Some(tenant) = &self.default_tenant
            && !is_valid_site_name(tenant)
        {
            errors.push(format!("Invalid default tenant: {:?}", tenant));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables features that might interfere
    /// with tests.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            developer_mode: true,
            enable_request_id: false,
            ..Default::default()
        }
    }
}
