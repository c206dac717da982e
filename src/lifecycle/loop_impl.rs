//! Blocking driver for a scan.

use super::api::ScanApi;
use super::controller::{LifecycleController, PollOutcome};
use super::session::{ScanSession, ScanStatus};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Longest single sleep, so a stop request is noticed promptly.
const MAX_SLEEP: Duration = Duration::from_millis(250);

/// How a driven scan ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Report fetched and normalized
    Ready,
    /// Session ended in Error with this message
    Failed(String),
    /// Stopped by the user
    Interrupted,
}

/// Upload `file`, trigger the scan and poll until it ends.
///
/// Installs a Ctrl-C handler that stops the loop between polls.
/// `on_update` is called after every state change.
pub fn run_scan<A: ScanApi>(
    controller: &mut LifecycleController<A>,
    file: &Path,
    on_update: impl FnMut(&ScanSession),
) -> anyhow::Result<RunOutcome> {
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop_flag = Arc::clone(&stop);
        ctrlc::set_handler(move || {
            stop_flag.store(true, Ordering::Relaxed);
        })
        .ok(); // Non-fatal if handler cannot be installed
    }
    run_scan_until(controller, file, &stop, on_update)
}

/// [`run_scan`] with a caller-owned stop flag.
pub fn run_scan_until<A: ScanApi>(
    controller: &mut LifecycleController<A>,
    file: &Path,
    stop: &AtomicBool,
    mut on_update: impl FnMut(&ScanSession),
) -> anyhow::Result<RunOutcome> {
    controller.select_file(Some(file.to_path_buf()));
    match controller.start_upload(Instant::now()) {
        Ok(()) => {}
        Err(e) if !e.is_fatal_for_session() => return Err(e.into()),
        Err(_) => {
            on_update(controller.session());
            return Ok(failed(controller.session()));
        }
    }
    on_update(controller.session());
    drive(controller, stop, on_update)
}

/// Poll until the session reaches a terminal state or `stop` is set.
pub fn drive<A: ScanApi>(
    controller: &mut LifecycleController<A>,
    stop: &AtomicBool,
    mut on_update: impl FnMut(&ScanSession),
) -> anyhow::Result<RunOutcome> {
    loop {
        if stop.load(Ordering::Relaxed) {
            tracing::info!("Stopping scan loop");
            return Ok(RunOutcome::Interrupted);
        }

        match controller.poll_step(Instant::now()) {
            PollOutcome::NotDue(remaining) => std::thread::sleep(remaining.min(MAX_SLEEP)),
            PollOutcome::Pending | PollOutcome::Discarded => on_update(controller.session()),
            PollOutcome::Ready => {
                on_update(controller.session());
                return Ok(RunOutcome::Ready);
            }
            PollOutcome::Failed | PollOutcome::TimedOut => {
                on_update(controller.session());
                return Ok(failed(controller.session()));
            }
            PollOutcome::Idle => {
                let session = controller.session();
                return match session.status {
                    ScanStatus::Ready => Ok(RunOutcome::Ready),
                    ScanStatus::Error => Ok(failed(session)),
                    other => anyhow::bail!("no scan in progress (status: {other})"),
                };
            }
        }
    }
}

fn failed(session: &ScanSession) -> RunOutcome {
    RunOutcome::Failed(session.last_message.clone())
}
