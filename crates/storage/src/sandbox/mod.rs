//! Path resolver and sandbox guard.
//!
//! [`SiteFileResolver`] turns a `(tenant id, raw request path)` pair into
//! either a file confined to that tenant's root or a definitive
//! [`ResolutionOutcome::NotFound`].
//!
//! # Algorithm
//!
//! | Step | Check | On failure |
//! |------|-------|------------|
//! | 1 | Build `<storage-root>/<tenant>/public/files` ([`TenantRoot`]) | `InvalidTenant` |
//! | 2 | Coerce the raw bytes to a native path ([`RequestPath::to_native`]) | `MalformedPath` |
//! | 3 | Canonicalize the storage root, rebuild the tenant root below it, canonicalize the joined candidate | `Unresolvable` |
//! | 4 | Candidate descends from the root, component-wise | `OutsideRoot` |
//! | 5 | Candidate is a regular file | `NotARegularFile` |
//! | 6 | Open, re-checking the handle | `OpenFailed` |
//!
//! Every failure class in the last column is a [`Rejection`]. Rejections are
//! visible only through [`Diagnostics`]; the caller always sees `NotFound`.

mod diagnostics;
mod outcome;
mod path;
mod resolver;
mod root;

pub use diagnostics::{Diagnostics, Rejection};
pub use outcome::{ResolutionOutcome, ServedFile};
pub use path::RequestPath;
pub use resolver::SiteFileResolver;
pub use root::TenantRoot;
