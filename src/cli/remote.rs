//! Handlers for commands that talk to the scanning service.

use super::{emit_report, exit_codes};
use crate::client::HttpScanApi;
use crate::config::AppConfig;
use crate::lifecycle::{run_scan as drive_scan, LifecycleController, PollPolicy, RunOutcome};
use crate::lifecycle::{ScanApi, ScanSession, ScanStatus};
use crate::remediation::Advisor;
use crate::reports::{HumanReport, ReportMetadata};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

fn controller(config: &AppConfig) -> Result<LifecycleController<HttpScanApi>> {
    let api = HttpScanApi::new(&config.service).context("failed to create HTTP client")?;
    let policy = PollPolicy::from_config(&config.polling).context("invalid polling settings")?;
    Ok(LifecycleController::new(api, policy))
}

/// Render the report held by the session.
fn emit_session_report(
    session: &ScanSession,
    config: &AppConfig,
    advisor: &Advisor,
    source: String,
    quiet: bool,
) -> Result<i32> {
    let Some(normalized) = session.report.as_ref() else {
        anyhow::bail!("scan finished without a report");
    };
    let report = HumanReport::build(normalized, advisor);
    let meta = ReportMetadata::new()
        .with_source(source)
        .with_report_path(session.report_path.clone());
    emit_report(report, &meta, &config.output, quiet)
}

/// Progress lines on stderr, one per status or message change.
struct ProgressPrinter {
    quiet: bool,
    status: ScanStatus,
    progress: u8,
    message: String,
}

impl ProgressPrinter {
    fn new(quiet: bool) -> Self {
        Self {
            quiet,
            status: ScanStatus::Idle,
            progress: 0,
            message: String::new(),
        }
    }

    fn update(&mut self, session: &ScanSession) {
        if self.quiet {
            return;
        }
        if session.status != self.status || session.progress_percent != self.progress {
            eprintln!("[{}] {}%", session.status, session.progress_percent);
            self.status = session.status;
            self.progress = session.progress_percent;
        }
        if !session.last_message.is_empty() && session.last_message != self.message {
            eprintln!("  {}", session.last_message);
            self.message.clone_from(&session.last_message);
        }
    }
}

/// Run the scan command: upload, trigger, poll, fetch and render.
pub fn run_scan(config: &AppConfig, advisor: &Advisor, file: &Path, quiet: bool) -> Result<i32> {
    let mut controller = controller(config)?;
    let mut printer = ProgressPrinter::new(quiet);

    tracing::info!("Uploading {} to {}", file.display(), config.service.base_url);
    let outcome = drive_scan(&mut controller, file, |session| printer.update(session))?;

    match outcome {
        RunOutcome::Ready => emit_session_report(
            controller.session(),
            config,
            advisor,
            file.display().to_string(),
            quiet,
        ),
        RunOutcome::Failed(message) => anyhow::bail!("{message}"),
        RunOutcome::Interrupted => {
            eprintln!("Interrupted.");
            Ok(exit_codes::ERROR)
        }
    }
}

/// Run the report command for a previously completed scan.
pub fn run_report(config: &AppConfig, advisor: &Advisor, hash: &str, quiet: bool) -> Result<i32> {
    let mut controller = controller(config)?;
    if controller.open_completed(hash).is_err() {
        anyhow::bail!("{}", controller.session().last_message);
    }
    emit_session_report(controller.session(), config, advisor, hash.to_string(), quiet)
}

/// Run the scans command: list recent scans.
pub fn run_scans(config: &AppConfig, page: u32, json: bool) -> Result<i32> {
    let controller = controller(config)?;
    let scans = controller
        .api()
        .recent_scans(page)
        .context("failed to list scans")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scans)?);
        return Ok(exit_codes::SUCCESS);
    }
    if scans.is_empty() {
        println!("No scans found.");
        return Ok(exit_codes::SUCCESS);
    }
    println!("{:<32}  {:<24}  {:<32}  TIMESTAMP", "HASH", "APP", "PACKAGE");
    for scan in &scans {
        println!(
            "{:<32}  {:<24}  {:<32}  {}",
            scan.hash, scan.app_name, scan.package_name, scan.timestamp
        );
    }
    Ok(exit_codes::SUCCESS)
}

/// Run the pdf command: download the PDF rendering to `dest`.
pub fn run_pdf(config: &AppConfig, hash: &str, dest: Option<PathBuf>, quiet: bool) -> Result<i32> {
    let mut controller = controller(config)?;
    controller.select_identity(Some(hash.to_string()));

    let dest = match dest {
        Some(path) => path,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    let saved = controller
        .fetch_document()
        .and_then(|document| document.save_to(&dest));
    controller.close_document()?;
    let saved = saved.context("PDF download failed")?;

    if !quiet {
        eprintln!("Saved {}", saved.display());
    }
    Ok(exit_codes::SUCCESS)
}

/// Run the crucial command: print the sensitive-snippet summary.
pub fn run_crucial(config: &AppConfig, hash: &str, json: bool) -> Result<i32> {
    let mut controller = controller(config)?;
    controller.select_identity(Some(hash.to_string()));
    let summary = controller
        .crucial_summary()
        .context("failed to fetch crucial findings")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(exit_codes::SUCCESS);
    }
    println!("Crucial findings: {}", summary.count);
    for finding in &summary.findings {
        println!("- {}", finding.path);
        if !finding.snippet.is_empty() {
            for line in finding.snippet.lines() {
                println!("    {line}");
            }
        }
    }
    Ok(exit_codes::SUCCESS)
}
