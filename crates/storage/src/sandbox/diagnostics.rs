//! Rejection classes and the diagnostics side channel.

use std::fmt;

use tracing::{debug, warn};

use super::path::RequestPath;

/// Why a request was turned into `NotFound`.
///
/// Only ever written to logs. Callers of the resolver never see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The tenant id cannot name a directory.
    InvalidTenant,
    /// The request path has NUL bytes or an unrepresentable encoding.
    MalformedPath,
    /// Canonicalization or stat failed (missing, permission, I/O).
    Unresolvable,
    /// The canonical path escapes the tenant root.
    OutsideRoot,
    /// The target is a directory, device or other non-regular file.
    NotARegularFile,
    /// The file could not be opened, or changed type after the check.
    OpenFailed,
}

impl Rejection {
    /// Returns the stable label used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::InvalidTenant => "invalid-tenant",
            Rejection::MalformedPath => "malformed-path",
            Rejection::Unresolvable => "unresolvable",
            Rejection::OutsideRoot => "outside-root",
            Rejection::NotARegularFile => "not-a-regular-file",
            Rejection::OpenFailed => "open-failed",
        }
    }

    /// Returns `true` for classes that indicate hostile input and belong in
    /// the audit trail.
    pub fn is_suspicious(&self) -> bool {
        matches!(self, Rejection::OutsideRoot | Rejection::MalformedPath)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Controls what the resolver logs about rejected requests.
///
/// Both switches are off by default. Neither changes any outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Diagnostics {
    /// Log every rejection at `debug` with the underlying error.
    pub developer_mode: bool,
    /// Log suspicious rejections at `warn` with tenant, raw path and class.
    /// The resolved filesystem path is never included.
    pub audit_rejections: bool,
}

impl Diagnostics {
    /// Both channels disabled.
    pub fn off() -> Self {
        Self::default()
    }

    /// Sets developer mode.
    pub fn with_developer_mode(mut self, enabled: bool) -> Self {
        self.developer_mode = enabled;
        self
    }

    /// Sets the audit trail.
    pub fn with_audit_rejections(mut self, enabled: bool) -> Self {
        self.audit_rejections = enabled;
        self
    }

    /// Records one rejection.
    pub(crate) fn record(
        &self,
        tenant: &str,
        raw: &RequestPath,
        rejection: Rejection,
        detail: &dyn fmt::Display,
    ) {
        if self.developer_mode {
            debug!(
                tenant = %tenant.escape_debug(),
                path = %raw,
                rejection = %rejection,
                error = %detail,
                "File request rejected"
            );
        }

        if self.audit_rejections && rejection.is_suspicious() {
            warn!(
                tenant = %tenant.escape_debug(),
                path = %raw,
                rejection = %rejection,
                "Suspicious file request rejected"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_off() {
        let diagnostics = Diagnostics::default();
        assert!(!diagnostics.developer_mode);
        assert!(!diagnostics.audit_rejections);
        assert_eq!(diagnostics, Diagnostics::off());
    }

    #[test]
    fn test_builders() {
        let diagnostics = Diagnostics::off()
            .with_developer_mode(true)
            .with_audit_rejections(true);
        assert!(diagnostics.developer_mode);
        assert!(diagnostics.audit_rejections);
    }

    #[test]
    fn test_suspicious_classes() {
        assert!(Rejection::OutsideRoot.is_suspicious());
        assert!(Rejection::MalformedPath.is_suspicious());
        assert!(!Rejection::Unresolvable.is_suspicious());
        assert!(!Rejection::NotARegularFile.is_suspicious());
        assert!(!Rejection::OpenFailed.is_suspicious());
        assert!(!Rejection::InvalidTenant.is_suspicious());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Rejection::OutsideRoot.to_string(), "outside-root");
        assert_eq!(Rejection::NotARegularFile.as_str(), "not-a-regular-file");
    }

    #[test]
    fn test_record_does_not_panic_without_subscriber() {
        let diagnostics = Diagnostics::off()
            .with_developer_mode(true)
            .with_audit_rejections(true);
        diagnostics.record(
            "acme",
            &RequestPath::new("../../etc/passwd"),
            Rejection::OutsideRoot,
            &"escapes root",
        );
    }
}
