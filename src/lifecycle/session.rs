//! Scan session state.
//!
//! A [`ScanSession`] is the only mutable state in the lifecycle. Every
//! change of the selected identity bumps its generation; requests capture
//! the generation in a [`PollTicket`] when issued and their responses are
//! dropped if it no longer matches when applied.

use super::api::LogEntry;
use super::document::ReportDocument;
use crate::model::NormalizedReport;
use std::time::{Duration, Instant};

/// Where a scan is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ScanStatus {
    #[default]
    Idle,
    Uploading,
    Uploaded,
    Scanning,
    Ready,
    Error,
}

impl ScanStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Uploading => "uploading",
            Self::Uploaded => "uploaded",
            Self::Scanning => "scanning",
            Self::Ready => "ready",
            Self::Error => "error",
        }
    }

    /// Ready and Error end an upload cycle.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Error)
    }
}

impl std::fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The single armed poll timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTimer {
    /// Session generation the timer was armed under
    pub generation: u64,
    pub interval: Duration,
    pub armed_at: Instant,
    pub next_due: Instant,
}

impl PollTimer {
    #[must_use]
    pub fn arm(generation: u64, interval: Duration, now: Instant) -> Self {
        Self {
            generation,
            interval,
            armed_at: now,
            next_due: now + interval,
        }
    }

    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    /// Time until the next poll; zero when due.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// Time since the timer was first armed.
    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.armed_at)
    }

    pub fn reschedule(&mut self, now: Instant) {
        self.next_due = now + self.interval;
    }
}

/// Captured at request issue time; checked when the response is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTicket {
    pub generation: u64,
    pub hash: Option<String>,
}

/// Mutable state of one selected scan.
#[derive(Debug, Default)]
pub struct ScanSession {
    pub hash: Option<String>,
    pub status: ScanStatus,
    pub progress_percent: u8,
    pub last_message: String,
    pub logs: Vec<LogEntry>,
    pub report: Option<NormalizedReport>,
    /// Where the service saved the report, when the save fallback was used
    pub report_path: Option<String>,
    pub document: Option<ReportDocument>,
    pub generation: u64,
    pub timer: Option<PollTimer>,
    pub poll_attempts: u32,
}

impl ScanSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear everything and select `hash`. Outstanding tickets go stale and
    /// any held document is released.
    pub fn reset_for(&mut self, hash: Option<String>) {
        let generation = self.generation.wrapping_add(1);
        *self = Self {
            hash,
            generation,
            ..Self::default()
        };
    }

    #[must_use]
    pub fn ticket(&self) -> PollTicket {
        PollTicket {
            generation: self.generation,
            hash: self.hash.clone(),
        }
    }

    /// Whether a response issued under `ticket` may still be applied.
    #[must_use]
    pub fn accepts(&self, ticket: &PollTicket) -> bool {
        ticket.generation == self.generation && ticket.hash == self.hash
    }

    /// Record upload progress; never moves backwards within a cycle.
    pub fn set_progress(&mut self, percent: u8) {
        self.progress_percent = self.progress_percent.max(percent.min(100));
    }

    /// Arm the poll timer, replacing any previous one.
    pub fn arm_timer(&mut self, interval: Duration, now: Instant) {
        self.timer = Some(PollTimer::arm(self.generation, interval, now));
        self.poll_attempts = 0;
    }

    pub fn cancel_timer(&mut self) {
        self.timer = None;
    }

    /// Move to Error with `message`; stops polling.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.cancel_timer();
        self.status = ScanStatus::Error;
        self.last_message = message.into();
    }

    /// Hold a new document; the previous one is released.
    pub fn replace_document(&mut self, document: ReportDocument) {
        self.document = Some(document);
    }

    /// Release the held document, if any.
    pub fn take_document(&mut self) -> Option<ReportDocument> {
        self.document.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_bumps_generation_and_clears() {
        let mut session = ScanSession::new();
        session.status = ScanStatus::Ready;
        session.last_message = "done".into();
        session.logs.push(LogEntry::new("t", "s"));
        session.arm_timer(Duration::from_secs(5), Instant::now());
        let before = session.ticket();

        session.reset_for(Some("b".into()));

        assert_eq!(session.generation, before.generation + 1);
        assert_eq!(session.hash.as_deref(), Some("b"));
        assert_eq!(session.status, ScanStatus::Idle);
        assert!(session.last_message.is_empty());
        assert!(session.logs.is_empty());
        assert!(session.timer.is_none());
        assert!(!session.accepts(&before));
    }

    #[test]
    fn test_progress_is_monotonic_and_clamped() {
        let mut session = ScanSession::new();
        session.set_progress(40);
        session.set_progress(10);
        assert_eq!(session.progress_percent, 40);
        session.set_progress(250);
        assert_eq!(session.progress_percent, 100);
    }

    #[test]
    fn test_arming_replaces_timer() {
        let mut session = ScanSession::new();
        let start = Instant::now();
        session.arm_timer(Duration::from_secs(5), start);
        session.poll_attempts = 7;
        session.arm_timer(Duration::from_secs(1), start + Duration::from_secs(2));
        let timer = session.timer.unwrap();
        assert_eq!(timer.interval, Duration::from_secs(1));
        assert_eq!(timer.next_due, start + Duration::from_secs(3));
        assert_eq!(session.poll_attempts, 0);
    }

    #[test]
    fn test_timer_due() {
        let now = Instant::now();
        let mut timer = PollTimer::arm(0, Duration::from_secs(5), now);
        assert!(!timer.is_due(now));
        assert_eq!(timer.remaining(now), Duration::from_secs(5));
        assert!(timer.is_due(now + Duration::from_secs(5)));
        timer.reschedule(now + Duration::from_secs(6));
        assert_eq!(timer.remaining(now + Duration::from_secs(6)), Duration::from_secs(5));
        assert_eq!(timer.elapsed(now + Duration::from_secs(6)), Duration::from_secs(6));
    }

    #[test]
    fn test_reset_releases_document() {
        let mut session = ScanSession::new();
        session.replace_document(ReportDocument::from_bytes("a", b"%PDF").unwrap());
        let path = session.document.as_ref().unwrap().path().to_path_buf();
        session.reset_for(None);
        assert!(!path.exists());
    }

    #[test]
    fn test_fail_stops_polling() {
        let mut session = ScanSession::new();
        session.arm_timer(Duration::from_secs(5), Instant::now());
        session.fail("boom");
        assert_eq!(session.status, ScanStatus::Error);
        assert!(session.timer.is_none());
        assert_eq!(session.last_message, "boom");
    }
}
