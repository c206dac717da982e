//! Markdown report generator.

use super::escape::{escape_markdown_inline, escape_markdown_list, escape_markdown_table};
use super::{HumanReport, ReportError, ReportFormat, ReportGenerator, ReportMetadata};
use crate::model::SeverityTier;
use std::fmt::Write;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(
        &self,
        report: &HumanReport,
        meta: &ReportMetadata,
    ) -> Result<String, ReportError> {
        let mut md = String::new();
        let m = &report.metadata;
        let s = &report.summary;

        writeln!(md, "# Security report: {}\n", escape_markdown_inline(&m.app_name))?;

        writeln!(md, "| Field | Value |")?;
        writeln!(md, "|-------|-------|")?;
        let rows = [
            ("Name", m.app_name.clone()),
            ("APK File", m.file_name.clone()),
            ("Package", m.package_name.clone()),
            ("Version", m.version_name.clone()),
            ("Size", m.size.clone()),
            ("Target / Min SDK", format!("{} / {}", m.target_sdk, m.min_sdk)),
            ("Hash", m.hash.clone()),
        ];
        for (field, value) in rows {
            writeln!(md, "| {field} | {} |", escape_markdown_table(&value))?;
        }
        writeln!(md)?;

        writeln!(
            md,
            "**Score:** {}/100 ({}) · High: {} · Medium: {} · Info: {}\n",
            s.score,
            report.risk_level.label(),
            s.high,
            s.medium,
            s.info
        )?;

        writeln!(md, "## Key vulnerabilities\n")?;
        for section in &report.sections {
            writeln!(md, "### {}\n", section.heading())?;
            if section.findings.is_empty() {
                writeln!(md, "_{}_\n", section.empty_message)?;
                continue;
            }
            for finding in &section.findings {
                writeln!(
                    md,
                    "- **{}** ({})",
                    escape_markdown_inline(&finding.title),
                    escape_markdown_inline(&finding.raw_severity)
                )?;
                if !finding.description.is_empty() {
                    writeln!(md, "  - {}", escape_markdown_list(&finding.description))?;
                }
                if section.tier == SeverityTier::Info {
                    continue;
                }
                if !finding.path.is_empty() {
                    writeln!(md, "  - Path: {}", escape_markdown_list(&finding.path))?;
                }
                writeln!(md, "  - Fix: {}", escape_markdown_list(&finding.remediation))?;
            }
            writeln!(md)?;
        }

        writeln!(md, "## Dangerous permissions\n")?;
        if report.permissions.is_empty() {
            writeln!(md, "_No dangerous permissions detected._\n")?;
        } else {
            writeln!(md, "| Permission | Info |")?;
            writeln!(md, "|------------|------|")?;
            for permission in &report.permissions {
                writeln!(
                    md,
                    "| {} | {} |",
                    escape_markdown_table(&permission.name),
                    escape_markdown_table(&permission.info)
                )?;
            }
            writeln!(md)?;
        }

        write!(md, "---\n_Generated by mobscan {}", meta.tool_version)?;
        if let Some(generated_at) = &meta.generated_at {
            write!(md, " at {generated_at}")?;
        }
        writeln!(md, "_")?;

        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::remediation::Advisor;
    use serde_json::json;

    #[test]
    fn test_markdown_escapes_service_text() {
        let raw = json!({
            "app_name": "Demo|App",
            "api": [{"title": "SQL `rawQuery`", "severity": "warning", "path": "db/Dao.java"}],
            "permissions": {"android.permission.READ_CONTACTS": {"status": "dangerous", "description": "read | write"}}
        });
        let report = HumanReport::build(&normalize(&raw), &Advisor::builtin());
        let md = MarkdownReporter::new()
            .generate(&report, &ReportMetadata::default())
            .unwrap();

        assert!(md.starts_with("# Security report: Demo\\|App"));
        assert!(md.contains("| Name | Demo\\|App |"));
        assert!(md.contains("- **SQL \\`rawQuery\\`** (warning)"));
        assert!(md.contains("  - Fix: Use parameterized queries"));
        assert!(md.contains("_No high severity issues._"));
        assert!(md.contains("| android.permission.READ_CONTACTS | read \\| write |"));
    }
}
