//! The scan lifecycle state machine.
//!
//! ```text
//! Idle -> Uploading -> Uploaded -> Scanning -(ready keyword)-> Ready
//!            |             |          |                         |
//!            +-------------+----------+----> Error <------------+ (report fetch)
//! ```
//!
//! Every network call is split into issue (capture a [`PollTicket`]) and
//! apply (drop the response if the ticket went stale). The controller is
//! single-threaded; [`run_scan`](super::run_scan) drives it.

use super::api::{CrucialSummary, ScanApi, ScanLogs};
use super::config::PollPolicy;
use super::document::ReportDocument;
use super::session::{PollTicket, ScanSession, ScanStatus};
use crate::error::{InputErrorKind, MobscanError, Result, TransportErrorKind};
use crate::normalize::normalize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Message shown while the log endpoint is not answering yet.
pub const NO_LOGS_MESSAGE: &str = "Polling logs... (no logs yet)";

/// Result of one call to [`LifecycleController::poll_step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing armed; not scanning
    Idle,
    /// Timer armed but not due yet
    NotDue(Duration),
    /// Polled, not ready, timer rescheduled
    Pending,
    /// Scan finished and the report was fetched
    Ready,
    /// Scan finished but the report fetch failed
    Failed,
    /// Poll budget exhausted
    TimedOut,
    /// Response belonged to a previous selection and was dropped
    Discarded,
}

/// Drives one [`ScanSession`] against a [`ScanApi`].
pub struct LifecycleController<A: ScanApi> {
    api: A,
    policy: PollPolicy,
    session: ScanSession,
    selected_file: Option<PathBuf>,
    notice: Option<String>,
}

impl<A: ScanApi> LifecycleController<A> {
    pub fn new(api: A, policy: PollPolicy) -> Self {
        Self {
            api,
            policy,
            session: ScanSession::new(),
            selected_file: None,
            notice: None,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &ScanSession {
        &self.session
    }

    #[must_use]
    pub const fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub const fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Latest inline input message (no file, no hash).
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Choose the local package to upload.
    pub fn select_file(&mut self, path: Option<PathBuf>) {
        self.selected_file = path;
        self.notice = None;
    }

    // ------------------------------------------------------------------
    // Upload and trigger
    // ------------------------------------------------------------------

    /// Idle -> Uploading -> Uploaded -> Scanning.
    ///
    /// Without a selected, existing file nothing changes and an input error
    /// is returned. Upload or trigger failures move the session to Error.
    pub fn start_upload(&mut self, now: Instant) -> Result<()> {
        let path = self.guard_file()?;

        self.session.reset_for(None);
        self.session.status = ScanStatus::Uploading;
        self.session.last_message = format!("Uploading {}...", path.display());
        tracing::info!("Uploading {}", path.display());

        let ticket = self.session.ticket();
        let session = &mut self.session;
        let result = self
            .api
            .upload(&path, &mut |percent| session.set_progress(percent));

        if !self.session.accepts(&ticket) {
            return Ok(());
        }
        match result {
            Ok(response) => {
                self.session.hash = Some(response.identity.clone());
                self.session.set_progress(100);
                self.session.status = ScanStatus::Uploaded;
                self.session.last_message =
                    format!("Uploaded. Hash: {}. Starting scan...", response.identity);
                tracing::info!("Upload accepted, hash {}", response.identity);
            }
            Err(e) => {
                self.session.fail(format!("Upload failed: {}", failure_detail(&e)));
                return Err(e);
            }
        }

        self.begin_scan(now)
    }

    fn guard_file(&mut self) -> Result<PathBuf> {
        let kind = match &self.selected_file {
            None => InputErrorKind::NoFileSelected,
            Some(path) if !path.is_file() => InputErrorKind::FileNotFound(path.clone()),
            Some(path) => return Ok(path.clone()),
        };
        self.notice = Some(kind.to_string());
        Err(MobscanError::input(kind))
    }

    /// Uploaded -> Scanning: trigger analysis and arm the poll timer.
    pub fn begin_scan(&mut self, now: Instant) -> Result<()> {
        let hash = self.require_hash()?;
        let ticket = self.session.ticket();
        let result = self.api.trigger_scan(&hash);
        if !self.session.accepts(&ticket) {
            return Ok(());
        }
        match result {
            Ok(_) => {
                self.session.status = ScanStatus::Scanning;
                self.session.last_message = "Scan started. Waiting for logs...".to_string();
                self.session.arm_timer(self.policy.interval, now);
                tracing::info!("Scan triggered for {hash}");
                Ok(())
            }
            Err(e) => {
                self.session.fail(format!("Scan trigger failed: {}", failure_detail(&e)));
                Err(e)
            }
        }
    }

    // ------------------------------------------------------------------
    // Polling
    // ------------------------------------------------------------------

    /// Issue a log request if the timer is due, and apply its response.
    pub fn poll_step(&mut self, now: Instant) -> PollOutcome {
        let Some(timer) = self.session.timer else {
            return PollOutcome::Idle;
        };
        if timer.generation != self.session.generation
            || self.session.status != ScanStatus::Scanning
        {
            self.session.cancel_timer();
            return PollOutcome::Idle;
        }
        if !timer.is_due(now) {
            return PollOutcome::NotDue(timer.remaining(now));
        }

        let elapsed = timer.elapsed(now);
        if self.policy.exhausted(self.session.poll_attempts, elapsed) {
            let message = self
                .policy
                .timeout_message(self.session.poll_attempts, elapsed);
            tracing::warn!("{message}");
            self.session.fail(message);
            return PollOutcome::TimedOut;
        }

        let Some(hash) = self.session.hash.clone() else {
            self.session.cancel_timer();
            return PollOutcome::Idle;
        };
        self.session.poll_attempts += 1;
        let ticket = self.session.ticket();
        tracing::debug!("Polling logs for {hash} (attempt {})", self.session.poll_attempts);
        let result = self.api.scan_logs(&hash);
        self.apply_logs(&ticket, result, now)
    }

    /// Apply a log response issued under `ticket`.
    pub fn apply_logs(
        &mut self,
        ticket: &PollTicket,
        result: Result<ScanLogs>,
        now: Instant,
    ) -> PollOutcome {
        if !self.session.accepts(ticket) || self.session.status != ScanStatus::Scanning {
            tracing::debug!("Discarding stale log response");
            return PollOutcome::Discarded;
        }

        match result {
            Err(e) => {
                tracing::warn!("Log fetch failed: {e}");
                self.session.last_message = NO_LOGS_MESSAGE.to_string();
                self.reschedule(now);
                PollOutcome::Pending
            }
            Ok(logs) if logs.is_ready() => {
                self.session.cancel_timer();
                self.session.logs = logs.logs;
                self.session.status = ScanStatus::Ready;
                self.session.last_message = "Scan completed. Fetching report...".to_string();
                tracing::info!("Scan finished after {} poll(s)", self.session.poll_attempts);
                match self.fetch_report() {
                    Ok(()) => PollOutcome::Ready,
                    Err(_) => PollOutcome::Failed,
                }
            }
            Ok(logs) => {
                if let Some(message) = logs.last_message() {
                    self.session.last_message = message;
                }
                self.session.logs = logs.logs;
                self.reschedule(now);
                PollOutcome::Pending
            }
        }
    }

    fn reschedule(&mut self, now: Instant) {
        if let Some(timer) = self.session.timer.as_mut() {
            timer.reschedule(now);
        }
    }

    /// Issue a ticket for the current selection.
    #[must_use]
    pub fn issue_ticket(&self) -> PollTicket {
        self.session.ticket()
    }

    // ------------------------------------------------------------------
    // Reports
    // ------------------------------------------------------------------

    /// Fetch and normalize the report for the selected hash.
    ///
    /// Reads the report directly and falls back to save-then-read once.
    /// Failure moves the session to Error.
    pub fn fetch_report(&mut self) -> Result<()> {
        let hash = self.require_hash()?;
        let ticket = self.session.ticket();
        let result = self.read_report(&hash);
        if !self.session.accepts(&ticket) {
            return Ok(());
        }

        match result {
            Ok((raw, saved_path)) => {
                let report = normalize(&raw);
                tracing::info!(
                    "Report for {hash}: {} finding(s), {} permission risk(s)",
                    report.finding_count(),
                    report.permissions.len()
                );
                self.session.report = Some(report);
                self.session.report_path = saved_path;
                self.session.status = ScanStatus::Ready;
                self.session.last_message = "Report ready.".to_string();
                Ok(())
            }
            Err(e) => {
                self.session
                    .fail(format!("Failed to fetch report: {}", failure_detail(&e)));
                Err(e)
            }
        }
    }

    fn read_report(&self, hash: &str) -> Result<(Value, Option<String>)> {
        match self.api.report_json(hash) {
            Ok(raw) => Ok((raw, None)),
            Err(direct) => {
                tracing::warn!("Direct report read failed ({direct}); trying save fallback");
                let saved = self.api.save_report_json(hash)?;
                let data = saved.data.ok_or_else(|| {
                    MobscanError::transport(
                        "saving report",
                        TransportErrorKind::InvalidResponse("saved report carried no data".into()),
                    )
                })?;
                Ok((data, Some(saved.path)))
            }
        }
    }

    /// Select another scan. A different identity resets the session.
    pub fn select_identity(&mut self, hash: Option<String>) {
        if self.session.hash == hash {
            return;
        }
        tracing::debug!("Selecting {hash:?}");
        self.session.reset_for(hash);
        self.notice = None;
    }

    /// Open a previously completed scan without uploading or scanning.
    pub fn open_completed(&mut self, hash: impl Into<String>) -> Result<()> {
        self.select_identity(Some(hash.into()));
        self.fetch_report()
    }

    // ------------------------------------------------------------------
    // Documents and extras
    // ------------------------------------------------------------------

    /// Fetch the PDF rendering; replaces (and releases) any held document.
    ///
    /// Failures leave the session status unchanged.
    pub fn fetch_document(&mut self) -> Result<&ReportDocument> {
        let hash = self.require_hash()?;
        let ticket = self.session.ticket();
        let result = self
            .api
            .report_document(&hash)
            .and_then(|bytes| ReportDocument::from_bytes(&hash, &bytes));
        if !self.session.accepts(&ticket) {
            return Err(MobscanError::validation("selection changed during PDF fetch"));
        }
        match result {
            Ok(document) => {
                tracing::info!("Fetched PDF for {hash} ({} bytes)", document.len());
                self.session.replace_document(document);
                self.session
                    .document
                    .as_ref()
                    .ok_or_else(|| MobscanError::validation("document missing after fetch"))
            }
            Err(e) => {
                self.session.last_message = format!("PDF fetch failed: {}", failure_detail(&e));
                Err(e)
            }
        }
    }

    /// Release the held PDF.
    pub fn close_document(&mut self) -> Result<()> {
        match self.session.take_document() {
            Some(document) => document.close(),
            None => Ok(()),
        }
    }

    pub fn crucial_summary(&mut self) -> Result<CrucialSummary> {
        let hash = self.require_hash()?;
        self.api.crucial_summary(&hash)
    }

    fn require_hash(&mut self) -> Result<String> {
        match &self.session.hash {
            Some(hash) => Ok(hash.clone()),
            None => {
                let kind = InputErrorKind::NoIdentitySelected;
                self.notice = Some(kind.to_string());
                Err(MobscanError::input(kind))
            }
        }
    }

    /// Selected file, if any.
    #[must_use]
    pub fn selected_file(&self) -> Option<&Path> {
        self.selected_file.as_deref()
    }
}

/// Server-provided detail when present, else the error text.
fn failure_detail(err: &MobscanError) -> String {
    err.server_detail()
        .map_or_else(|| err.to_string(), str::to_string)
}
