//! Tenant identifiers.
//!
//! A tenant is one logical site sharing the storage tree. Its identifier is
//! used verbatim as a directory name under the storage root, so the only
//! structural rule enforced here is [`TenantId::is_path_safe`]: the id must be
//! exactly one normal path component.
//!
//! Format rules for *which* names are acceptable (host names, header values)
//! belong to the caller that derives the id from the request.

mod id;

pub use id::TenantId;
