//! Output target selection and report emission.

use super::exit_codes;
use crate::config::OutputConfig;
use crate::reports::{create_reporter_with_options, HumanReport, ReportFormat, ReportMetadata};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Target for output - either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Check if output is to a terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Determine if color should be used based on flags and environment
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none()
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}

/// Render `report` in the configured format and return the exit code.
///
/// `auto` opens the TUI when stdout is a terminal and prints the summary
/// otherwise. Files never receive ANSI colour.
pub fn emit_report(
    report: HumanReport,
    meta: &ReportMetadata,
    output: &OutputConfig,
    quiet: bool,
) -> Result<i32> {
    let target = OutputTarget::from_option(output.file.clone());
    let format = output.format.resolve(target.is_terminal());
    let has_high = report.has_high();

    if format == ReportFormat::Tui {
        crate::tui::run_tui(report).context("terminal UI failed")?;
    } else {
        let use_color =
            should_use_color(output.no_color) && matches!(target, OutputTarget::Stdout);
        let reporter = create_reporter_with_options(format, use_color);
        let text = reporter
            .generate(&report, meta)
            .context("failed to render report")?;
        write_output(&text, &target, quiet)?;
    }

    if output.fail_on_high && has_high {
        return Ok(exit_codes::HIGH_FINDINGS);
    }
    Ok(exit_codes::SUCCESS)
}
