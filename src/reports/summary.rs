//! Summary report generator for shell output.

use super::{FindingSection, HumanReport, ReportError, ReportFormat, ReportGenerator, ReportMetadata};
use crate::model::SeverityTier;
use crate::scoring::RiskLevel;

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn tier_color(tier: SeverityTier) -> &'static str {
    match tier {
        SeverityTier::High => "red",
        SeverityTier::Medium => "yellow",
        SeverityTier::Info => "cyan",
    }
}

const fn risk_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "green",
        RiskLevel::Moderate => "yellow",
        RiskLevel::Elevated | RiskLevel::Severe => "red",
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    colored: bool,
}

impl SummaryReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn push_section(&self, lines: &mut Vec<String>, section: &FindingSection) {
        lines.push(self.color(&section.heading(), tier_color(section.tier)));
        if section.findings.is_empty() {
            lines.push(format!("  {}", self.color(section.empty_message, "dim")));
            return;
        }
        for finding in &section.findings {
            lines.push(format!(
                "  • {} {}",
                self.color(&finding.title, "bold"),
                self.color(&format!("[{}]", finding.raw_severity), "dim")
            ));
            if !finding.description.is_empty() {
                lines.push(format!("    {}", finding.description));
            }
            // Info findings carry no fix in the summary
            if section.tier == SeverityTier::Info {
                continue;
            }
            if !finding.path.is_empty() {
                lines.push(format!("    {} {}", self.color("Path:", "dim"), finding.path));
            }
            lines.push(format!("    {} {}", self.color("Fix:", "green"), finding.remediation));
        }
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for SummaryReporter {
    fn generate(
        &self,
        report: &HumanReport,
        _meta: &ReportMetadata,
    ) -> Result<String, ReportError> {
        let m = &report.metadata;
        let s = &report.summary;
        let mut lines = Vec::new();

        lines.push(self.color("Mobile App Security Report", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!("{}      {} ({})", self.color("App:", "cyan"), m.app_name, m.file_name));
        lines.push(format!(
            "{}  {}  version {}",
            self.color("Package:", "cyan"),
            m.package_name,
            m.version_name
        ));
        lines.push(format!(
            "{}      target {} / min {}",
            self.color("SDK:", "cyan"),
            m.target_sdk,
            m.min_sdk
        ));
        lines.push(format!("{}     {}", self.color("Size:", "cyan"), m.size));
        lines.push(format!("{}     {}", self.color("Hash:", "cyan"), m.hash));
        lines.push(String::new());

        lines.push(format!(
            "{} {}  {}  {}  {}  ({} total)",
            self.color("Score:", "bold"),
            self.color(
                &format!("{}/100 ({})", s.score, report.risk_level.label()),
                risk_color(report.risk_level)
            ),
            self.color(&format!("High {}", s.high), "red"),
            self.color(&format!("Medium {}", s.medium), "yellow"),
            self.color(&format!("Info {}", s.info), "cyan"),
            s.total(),
        ));
        lines.push(String::new());

        for section in &report.sections {
            self.push_section(&mut lines, section);
            lines.push(String::new());
        }

        lines.push(self.color(
            &format!("Dangerous permissions ({})", report.permissions.len()),
            "bold",
        ));
        if report.permissions.is_empty() {
            lines.push(format!(
                "  {}",
                self.color("No dangerous permissions detected.", "dim")
            ));
        }
        for permission in &report.permissions {
            lines.push(format!("  • {}", self.color(&permission.name, "red")));
            if !permission.info.is_empty() {
                lines.push(format!("    {}", permission.info));
            }
        }

        lines.push(String::new());
        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::remediation::Advisor;
    use serde_json::json;

    fn report() -> HumanReport {
        let raw = json!({
            "app_name": "Demo",
            "manifest_analysis": {"manifest_findings": [
                {"title": "Debuggable app", "severity": "high", "path": "AndroidManifest.xml"}
            ]},
            "vulnerabilities": [{"title": "Uses WebView", "severity": "info", "description": "found"}],
            "permissions": {"android.permission.RECORD_AUDIO": "dangerous: record audio"}
        });
        HumanReport::build(&normalize(&raw), &Advisor::builtin())
    }

    #[test]
    fn test_plain_summary() {
        let text = SummaryReporter::new()
            .no_color()
            .generate(&report(), &ReportMetadata::default())
            .unwrap();
        assert!(!text.contains('\x1b'));
        assert!(text.contains("Score: 91/100 (Low risk)"), "{text}");
        assert!(text.contains("Info 1  (2 total)"), "{text}");
        assert!(text.contains("High (1)"));
        assert!(text.contains("Path: AndroidManifest.xml"));
        assert!(text.contains("Fix: Set android:debuggable"));
        assert!(text.contains("No medium severity issues."));
        assert!(text.contains("Other findings (1)"));
        assert!(text.contains("android.permission.RECORD_AUDIO"));
        // info findings show no fix line
        assert_eq!(text.matches("Fix:").count(), 1);
    }

    #[test]
    fn test_colored_summary() {
        let text = SummaryReporter::new()
            .generate(&report(), &ReportMetadata::default())
            .unwrap();
        assert!(text.contains("\x1b[31mHigh (1)\x1b[0m"));
    }
}
