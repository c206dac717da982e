//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Auto-detect: TUI if stdout is a terminal, summary otherwise
    #[default]
    Auto,
    /// Interactive TUI display
    Tui,
    /// Colored terminal summary
    Summary,
    /// Structured JSON output
    Json,
    /// Human-readable Markdown
    #[value(alias = "md")]
    Markdown,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Tui => write!(f, "tui"),
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

impl ReportFormat {
    /// Resolve `Auto` against whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, is_terminal: bool) -> Self {
        match self {
            Self::Auto if is_terminal => Self::Tui,
            Self::Auto => Self::Summary,
            other => other,
        }
    }
}

/// Context attached to a generated report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub tool_version: String,
    /// RFC 3339 generation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    /// Where the report JSON came from (service URL or file)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Path the service saved the report under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<String>,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Some(chrono::Utc::now().to_rfc3339()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_report_path(mut self, path: Option<String>) -> Self {
        self.report_path = path;
        self
    }
}
