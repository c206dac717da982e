//! Stable tier grouping.

use super::ScoreSummary;
use crate::model::{Finding, SeverityTier};
use indexmap::IndexMap;
use serde::Serialize;

/// Findings grouped by tier, plus their score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Always holds all three tiers, in High, Medium, Info order
    pub by_tier: IndexMap<SeverityTier, Vec<Finding>>,
    pub summary: ScoreSummary,
}

impl Classification {
    /// Findings of one tier, in source order.
    #[must_use]
    pub fn tier(&self, tier: SeverityTier) -> &[Finding] {
        self.by_tier.get(&tier).map_or(&[], Vec::as_slice)
    }
}

/// Group findings by tier and score them.
///
/// Grouping is an order-preserving filter: within each tier findings keep
/// their input order, duplicates included.
#[must_use]
pub fn classify(findings: &[Finding]) -> Classification {
    let mut by_tier: IndexMap<SeverityTier, Vec<Finding>> = SeverityTier::ALL
        .iter()
        .map(|tier| (*tier, Vec::new()))
        .collect();

    for finding in findings {
        by_tier
            .entry(finding.severity)
            .or_default()
            .push(finding.clone());
    }

    let count = |tier| by_tier.get(&tier).map_or(0, Vec::len);
    let summary = ScoreSummary::from_counts(
        count(SeverityTier::High),
        count(SeverityTier::Medium),
        count(SeverityTier::Info),
    );

    Classification { by_tier, summary }
}
