//! JSON report generator.

use super::{HumanReport, ReportError, ReportFormat, ReportGenerator, ReportMetadata};
use crate::model::AppMetadata;
use crate::scoring::{RiskLevel, ScoreSummary};
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Only emit metadata and score
    summary_only: bool,
    pretty: bool,
}

impl JsonReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            summary_only: false,
            pretty: true,
        }
    }

    /// Metadata and score only, no findings.
    #[must_use]
    pub const fn summary_only() -> Self {
        Self {
            summary_only: true,
            pretty: true,
        }
    }

    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn to_string<T: Serialize>(&self, value: &T) -> Result<String, ReportError> {
        let text = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        text.map_err(|e| ReportError::SerializationError(e.to_string()))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct FullJson<'a> {
    generator: &'a ReportMetadata,
    #[serde(flatten)]
    report: &'a HumanReport,
}

#[derive(Serialize)]
struct SummaryJson<'a> {
    generator: &'a ReportMetadata,
    metadata: &'a AppMetadata,
    summary: &'a ScoreSummary,
    risk_level: RiskLevel,
    dangerous_permissions: usize,
}

impl ReportGenerator for JsonReporter {
    fn generate(
        &self,
        report: &HumanReport,
        meta: &ReportMetadata,
    ) -> Result<String, ReportError> {
        if self.summary_only {
            self.to_string(&SummaryJson {
                generator: meta,
                metadata: &report.metadata,
                summary: &report.summary,
                risk_level: report.risk_level,
                dangerous_permissions: report.permissions.len(),
            })
        } else {
            self.to_string(&FullJson {
                generator: meta,
                report,
            })
        }
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::remediation::Advisor;
    use serde_json::{json, Value};

    #[test]
    fn test_full_json_has_sections_and_generator() {
        let raw = json!({"app_name": "Demo", "vulnerabilities": [{"title": "Weak MD5 hash", "severity": "warning"}]});
        let report = HumanReport::build(&normalize(&raw), &Advisor::builtin());
        let meta = ReportMetadata::new().with_source("demo.json");

        let text = JsonReporter::new().generate(&report, &meta).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["generator"]["source"], "demo.json");
        assert_eq!(value["metadata"]["app_name"], "Demo");
        assert_eq!(value["summary"]["score"], 96);
        assert_eq!(value["sections"][1]["tier"], "medium");
        assert_eq!(value["sections"][1]["findings"][0]["remediation_source"], "advisor");
    }

    #[test]
    fn test_summary_only_snapshot() {
        let raw = json!({
            "app_name": "Demo", "file_name": "demo.apk", "package_name": "com.demo",
            "version_name": "1.0", "target_sdk": 33, "min_sdk": 21, "size": "3MB", "hash": "abc",
            "api": [{"title": "Hardcoded key", "severity": "high"}]
        });
        let report = HumanReport::build(&normalize(&raw), &Advisor::builtin());
        let meta = ReportMetadata::default();
        let text = JsonReporter::summary_only().generate(&report, &meta).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        insta::assert_json_snapshot!(value, @r###"
        {
          "generator": {
            "tool_version": ""
          },
          "metadata": {
            "app_name": "Demo",
            "file_name": "demo.apk",
            "size": "3MB",
            "package_name": "com.demo",
            "version_name": "1.0",
            "target_sdk": "33",
            "min_sdk": "21",
            "hash": "abc"
          },
          "summary": {
            "high": 1,
            "medium": 0,
            "info": 0,
            "score": 92
          },
          "risk_level": "Low",
          "dangerous_permissions": 0
        }
        "###);
    }
}
