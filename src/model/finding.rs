//! Normalized security finding.

use super::SeverityTier;
use serde::{Deserialize, Serialize};

/// One normalized security observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Never empty
    pub title: String,
    pub severity: SeverityTier,
    /// Lower-cased severity text as the service reported it (`"info"` when absent)
    pub raw_severity: String,
    pub description: String,
    pub path: String,
    /// Fix text supplied by the report itself, if any
    pub remediation: Option<String>,
}

impl Finding {
    /// Build a finding from a title and raw severity text; the tier is
    /// derived from the text.
    pub fn new(title: impl Into<String>, raw_severity: impl Into<String>) -> Self {
        let raw_severity = raw_severity.into().to_lowercase();
        let raw_severity = if raw_severity.is_empty() {
            "info".to_string()
        } else {
            raw_severity
        };
        Self {
            title: title.into(),
            severity: SeverityTier::from_raw(&raw_severity),
            raw_severity,
            description: String::new(),
            path: String::new(),
            remediation: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_remediation(mut self, remediation: Option<String>) -> Self {
        self.remediation = remediation;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_tier_and_defaults() {
        let finding = Finding::new("Debug enabled", "WARNING");
        assert_eq!(finding.severity, SeverityTier::Medium);
        assert_eq!(finding.raw_severity, "warning");
        assert!(finding.description.is_empty());
        assert!(finding.remediation.is_none());

        let finding = Finding::new("Uses SHA1", "");
        assert_eq!(finding.raw_severity, "info");
        assert_eq!(finding.severity, SeverityTier::Info);
    }
}
