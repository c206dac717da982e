//! The human report view model.
//!
//! [`HumanReport`] is everything a renderer needs: overview metadata, the
//! score, findings grouped by tier with resolved remediation, and the
//! dangerous-permission list. All text is already truncated for display.

use crate::model::{AppMetadata, Finding, NormalizedReport, PermissionRisk, SeverityTier};
use crate::remediation::Advisor;
use crate::scoring::{classify, RiskLevel, ScoreSummary};
use serde::Serialize;
use unicode_width::UnicodeWidthChar;

/// Display width limit for descriptions and permission info.
pub const TEXT_LIMIT: usize = 160;
/// Display width limit for remediation text.
pub const REMEDIATION_LIMIT: usize = 400;

/// Where a finding's remediation text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemediationSource {
    Report,
    Advisor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindingView {
    pub title: String,
    pub severity: SeverityTier,
    pub raw_severity: String,
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub path: String,
    pub remediation: String,
    pub remediation_source: RemediationSource,
}

impl FindingView {
    fn new(finding: &Finding, advisor: &Advisor) -> Self {
        let from_report = finding
            .remediation
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty());
        Self {
            title: finding.title.clone(),
            severity: finding.severity,
            raw_severity: finding.raw_severity.clone(),
            description: truncate(&finding.description, TEXT_LIMIT),
            path: finding.path.clone(),
            remediation: truncate(advisor.resolve(finding), REMEDIATION_LIMIT),
            remediation_source: if from_report {
                RemediationSource::Report
            } else {
                RemediationSource::Advisor
            },
        }
    }
}

/// Findings of one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindingSection {
    pub tier: SeverityTier,
    pub title: &'static str,
    pub empty_message: &'static str,
    pub findings: Vec<FindingView>,
}

impl FindingSection {
    /// `"High (2)"`
    #[must_use]
    pub fn heading(&self) -> String {
        format!("{} ({})", self.title, self.findings.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionView {
    pub name: String,
    pub info: String,
}

impl From<&PermissionRisk> for PermissionView {
    fn from(permission: &PermissionRisk) -> Self {
        Self {
            name: permission.name.clone(),
            info: truncate(&permission.info, TEXT_LIMIT),
        }
    }
}

/// Renderable report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HumanReport {
    pub metadata: AppMetadata,
    pub summary: ScoreSummary,
    pub risk_level: RiskLevel,
    /// High, Medium, Info; always all three
    pub sections: Vec<FindingSection>,
    pub permissions: Vec<PermissionView>,
}

impl HumanReport {
    #[must_use]
    pub fn build(report: &NormalizedReport, advisor: &Advisor) -> Self {
        let classification = classify(&report.findings);
        let sections = classification
            .by_tier
            .iter()
            .map(|(tier, findings)| FindingSection {
                tier: *tier,
                title: tier.section_title(),
                empty_message: tier.empty_message(),
                findings: findings
                    .iter()
                    .map(|finding| FindingView::new(finding, advisor))
                    .collect(),
            })
            .collect();

        Self {
            metadata: report.metadata.clone(),
            summary: classification.summary,
            risk_level: classification.summary.risk_level(),
            sections,
            permissions: report.permissions.iter().map(PermissionView::from).collect(),
        }
    }

    /// Section for `tier`.
    #[must_use]
    pub fn section(&self, tier: SeverityTier) -> Option<&FindingSection> {
        self.sections.iter().find(|section| section.tier == tier)
    }

    #[must_use]
    pub fn has_high(&self) -> bool {
        self.summary.high > 0
    }
}

/// Cut `text` to `max_width` display columns and append `…` when cut.
#[must_use]
pub fn truncate(text: &str, max_width: usize) -> String {
    let mut width = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            return format!("{}…", &text[..idx]);
        }
        width += w;
    }
    text.to_string()
}
