//! Three-tier severity model.

use serde::{Deserialize, Serialize};

/// The only classification output: every finding lands in exactly one tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    High,
    Medium,
    #[default]
    Info,
}

/// A substring rule mapping free-text severity onto a tier.
#[derive(Debug, Clone, Copy)]
pub struct SeverityRule {
    pub needle: &'static str,
    pub tier: SeverityTier,
}

/// Severity rules, evaluated top to bottom. High before Medium; anything
/// unmatched is Info.
pub const SEVERITY_RULES: &[SeverityRule] = &[
    SeverityRule { needle: "high", tier: SeverityTier::High },
    SeverityRule { needle: "critical", tier: SeverityTier::High },
    SeverityRule { needle: "warn", tier: SeverityTier::Medium },
    SeverityRule { needle: "warning", tier: SeverityTier::Medium },
    SeverityRule { needle: "medium", tier: SeverityTier::Medium },
];

impl SeverityTier {
    /// All tiers in display order.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Info];

    /// Classify a free-text severity string.
    ///
    /// Matching is case-insensitive and substring-based, so `"HIGH RISK"`
    /// and `"critical"` are both High and `"warning"` is Medium.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        SEVERITY_RULES
            .iter()
            .find(|rule| lower.contains(rule.needle))
            .map_or(Self::Info, |rule| rule.tier)
    }

    /// Weight of one finding of this tier in the risk score.
    #[must_use]
    pub const fn penalty(self) -> u32 {
        match self {
            Self::High => 8,
            Self::Medium => 4,
            Self::Info => 1,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Info => "Info",
        }
    }

    /// Heading used for the tier's section in rendered reports.
    #[must_use]
    pub const fn section_title(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Info => "Other findings",
        }
    }

    /// Message shown when a tier has no findings.
    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::High => "No high severity issues.",
            Self::Medium => "No medium severity issues.",
            Self::Info => "No other issues.",
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_precedence() {
        assert_eq!(SeverityTier::from_raw("high"), SeverityTier::High);
        assert_eq!(SeverityTier::from_raw("CRITICAL"), SeverityTier::High);
        assert_eq!(SeverityTier::from_raw("warning"), SeverityTier::Medium);
        assert_eq!(SeverityTier::from_raw("Medium"), SeverityTier::Medium);
        // both "high" and "warn" present: High wins
        assert_eq!(SeverityTier::from_raw("warn/high"), SeverityTier::High);
    }

    #[test]
    fn test_from_raw_defaults_to_info() {
        assert_eq!(SeverityTier::from_raw(""), SeverityTier::Info);
        assert_eq!(SeverityTier::from_raw("info"), SeverityTier::Info);
        assert_eq!(SeverityTier::from_raw("secure"), SeverityTier::Info);
        assert_eq!(SeverityTier::from_raw("low"), SeverityTier::Info);
    }

    #[test]
    fn test_substring_not_exact() {
        assert_eq!(SeverityTier::from_raw("very highly risky"), SeverityTier::High);
        assert_eq!(SeverityTier::from_raw("warn-ish"), SeverityTier::Medium);
    }
}
