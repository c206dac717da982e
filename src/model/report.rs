//! The normalizer's output.

use super::{AppMetadata, Finding, PermissionRisk};
use serde::{Deserialize, Serialize};

/// Canonical projection of one raw report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedReport {
    pub metadata: AppMetadata,
    /// Manifest findings first, then API findings, then generic vulnerabilities
    pub findings: Vec<Finding>,
    pub permissions: Vec<PermissionRisk>,
}

impl NormalizedReport {
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.findings.len()
    }

    /// True when the report carried nothing beyond placeholders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty() && self.permissions.is_empty()
    }
}
