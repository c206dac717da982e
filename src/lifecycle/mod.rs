//! Scan lifecycle: upload, trigger, poll, fetch.
//!
//! [`LifecycleController`] owns a [`ScanSession`] and talks to the service
//! through the [`ScanApi`] trait. [`run_scan`] is the blocking driver used
//! by the CLI.

mod api;
mod config;
mod controller;
mod document;
mod loop_impl;
mod session;

pub use api::{
    CrucialFinding, CrucialSummary, LogEntry, SavedReport, ScanApi, ScanListing, ScanLogs,
    UploadResponse, READY_KEYWORDS,
};
pub use config::{parse_duration, PollPolicy};
pub use controller::{LifecycleController, PollOutcome, NO_LOGS_MESSAGE};
pub use document::ReportDocument;
pub use loop_impl::{drive, run_scan, run_scan_until, RunOutcome};
pub use session::{PollTicket, PollTimer, ScanSession, ScanStatus};
