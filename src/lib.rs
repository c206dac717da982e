//! **Upload mobile app packages to a static-analysis service and read the results.**
//!
//! `mobscan` drives a MobSF-style scanning service through one scan
//! lifecycle (upload, trigger, poll, fetch) and turns whatever report shape
//! the service returns into a human-readable security report: app
//! metadata, findings grouped by severity with remediation advice, a 0-100
//! risk score and the dangerous permissions the app requests.
//!
//! ## Core Concepts & Modules
//!
//! - **[`normalize`]**: projects an arbitrarily shaped report JSON onto the
//!   canonical [`NormalizedReport`]. Normalization never fails.
//! - **[`scoring`]**: partitions findings into High / Medium / Info and
//!   computes the risk score.
//! - **[`remediation`]**: maps finding titles to fix recommendations.
//! - **[`lifecycle`]**: the scan state machine, the [`ScanApi`] seam and the
//!   blocking driver loop.
//! - **[`client`]**: the HTTP [`ScanApi`] implementation (`remote` feature).
//! - **[`reports`]** and **[`tui`]**: rendering.
//!
//! ## Rendering a saved report
//!
//! ```
//! use mobscan::normalize::normalize;
//! use mobscan::remediation::Advisor;
//! use mobscan::reports::{create_reporter_with_options, HumanReport, ReportFormat, ReportMetadata};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "app_name": "Diva",
//!     "vulnerabilities": [{"title": "App uses cleartext traffic", "severity": "high"}],
//! });
//! let report = HumanReport::build(&normalize(&raw), &Advisor::builtin());
//! assert_eq!(report.summary.score, 92);
//!
//! let text = create_reporter_with_options(ReportFormat::Summary, false)
//!     .generate(&report, &ReportMetadata::new())
//!     .unwrap();
//! assert!(text.contains("Diva"));
//! ```
//!
//! ## Feature Flags
//!
//! - `remote` (default): the `reqwest`-based HTTP client and the CLI
//!   commands that talk to the service. Without it only `render` is
//!   available.

// No unwrap() outside tests
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions
)]

pub mod cli;
#[cfg(feature = "remote")]
pub mod client;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod normalize;
pub mod remediation;
pub mod reports;
pub mod scoring;
pub mod tui;

// Re-export main types for convenience
#[cfg(feature = "remote")]
pub use client::HttpScanApi;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, Validatable};
pub use error::{ErrorContext, MobscanError, Result};
pub use lifecycle::{LifecycleController, PollPolicy, ScanApi, ScanSession, ScanStatus};
pub use model::{AppMetadata, Finding, NormalizedReport, PermissionRisk, SeverityTier};
pub use normalize::{normalize, normalize_str};
pub use remediation::{recommend, Advisor};
pub use reports::{HumanReport, ReportFormat, ReportGenerator};
pub use scoring::{classify, Classification, RiskLevel, ScoreSummary};
