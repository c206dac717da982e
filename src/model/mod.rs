//! Canonical report model.
//!
//! Whatever shape the scanning service returns, the normalizer projects it
//! onto these types. They are read-only once built: a freshly fetched
//! report produces a fresh [`NormalizedReport`] rather than mutating an
//! existing one.

mod finding;
mod metadata;
mod permission;
mod report;
mod severity;

pub use finding::Finding;
pub use metadata::AppMetadata;
pub use permission::PermissionRisk;
pub use report::NormalizedReport;
pub use severity::{SeverityRule, SeverityTier, SEVERITY_RULES};
