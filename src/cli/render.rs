//! Render command handler.
//!
//! Renders a report JSON file that was saved earlier, without contacting
//! the service.

use super::emit_report;
use crate::config::AppConfig;
use crate::normalize::normalize_str;
use crate::remediation::Advisor;
use crate::reports::{HumanReport, ReportMetadata};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the render command
pub fn run_render(config: &AppConfig, advisor: &Advisor, path: &Path, quiet: bool) -> Result<i32> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let normalized =
        normalize_str(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(
        findings = normalized.findings.len(),
        permissions = normalized.permissions.len(),
        "loaded report from {}",
        path.display()
    );

    let report = HumanReport::build(&normalized, advisor);
    let meta = ReportMetadata::new().with_source(path.display().to_string());
    emit_report(report, &meta, &config.output, quiet)
}
