//! Report rendering.
//!
//! Every output format renders the same [`HumanReport`] view model:
//! - Summary: colored terminal text
//! - JSON: the view model plus generation metadata
//! - Markdown: tables and lists, escaped via [`escape`]
//!
//! The interactive TUI lives in [`crate::tui`] and renders the same model.

pub mod escape;
mod json;
mod markdown;
mod summary;
mod types;
mod view;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::SummaryReporter;
pub use types::{ReportFormat, ReportMetadata};
pub use view::{
    truncate, FindingSection, FindingView, HumanReport, PermissionView, RemediationSource,
    REMEDIATION_LIMIT, TEXT_LIMIT,
};

use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the report to a string.
    fn generate(&self, report: &HumanReport, meta: &ReportMetadata)
        -> Result<String, ReportError>;

    /// Render the report into a writer.
    fn write_report(
        &self,
        report: &HumanReport,
        meta: &ReportMetadata,
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let text = self.generate(report, meta)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control.
///
/// `Auto` and `Tui` fall back to the summary; callers that can show the
/// TUI resolve those first.
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Tui | ReportFormat::Summary => {
            if use_color {
                Box::new(SummaryReporter::new())
            } else {
                Box::new(SummaryReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
    }
}
