//! The scanning service as seen by the lifecycle controller.
//!
//! [`ScanApi`] is the only seam between orchestration and transport. The
//! response types parse leniently: the service's wire format varies between
//! versions, so every field is probed through aliases.

use crate::error::{MobscanError, Result, TransportErrorKind};
use crate::normalize::aliases::{self, is_present, probe, probe_array, probe_text, value_text};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Operations the controller needs from the scanning service.
pub trait ScanApi {
    /// Upload a package. `progress` receives percentages in `0..=100`.
    fn upload(&self, path: &Path, progress: &mut dyn FnMut(u8)) -> Result<UploadResponse>;

    /// Start static analysis of an uploaded package.
    fn trigger_scan(&self, hash: &str) -> Result<Value>;

    /// Current analysis log.
    fn scan_logs(&self, hash: &str) -> Result<ScanLogs>;

    /// Read the generated JSON report.
    fn report_json(&self, hash: &str) -> Result<Value>;

    /// Ask the service to persist the report and return it.
    fn save_report_json(&self, hash: &str) -> Result<SavedReport>;

    /// PDF rendering of the report.
    fn report_document(&self, hash: &str) -> Result<Vec<u8>>;

    /// Condensed list of critical findings.
    fn crucial_summary(&self, hash: &str) -> Result<CrucialSummary>;

    /// Previously completed scans, newest first.
    fn recent_scans(&self, page: u32) -> Result<Vec<ScanListing>>;
}

/// Upload acknowledgement with the identity the service assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadResponse {
    pub raw: Value,
    pub identity: String,
}

impl UploadResponse {
    /// Probe the identity via `hash`, `MD5`, `md5`.
    pub fn from_raw(raw: Value) -> Result<Self> {
        let identity = probe_text(&raw, aliases::IDENTITY).ok_or_else(|| {
            MobscanError::transport("reading upload response", TransportErrorKind::MissingIdentity)
        })?;
        Ok(Self { raw, identity })
    }
}

/// One analysis log line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    /// Any other fields the service sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LogEntry {
    pub fn new(timestamp: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            status: status.into(),
            ..Self::default()
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(object) => {
                let mut extra = object.clone();
                let timestamp = extra.remove("timestamp").map(|v| text_or_empty(&v));
                let status = extra.remove("status").map(|v| text_or_empty(&v));
                let exception = extra
                    .remove("exception")
                    .filter(is_present)
                    .map(|v| value_text(&v));
                Self {
                    timestamp: timestamp.unwrap_or_default(),
                    status: status.unwrap_or_default(),
                    exception,
                    extra,
                }
            }
            other => Self::new("", text_or_empty(other)),
        }
    }
}

fn text_or_empty(value: &Value) -> String {
    if is_present(value) {
        value_text(value)
    } else {
        String::new()
    }
}

/// Words in a scan log that mean the report is ready to fetch.
pub const READY_KEYWORDS: &[&str] = &[
    "generating report",
    "generating hashes",
    "generation complete",
    "completed",
    "finished",
    "saving to database",
    "saved to database",
    "saving results",
    "report generated",
];

/// Full analysis log of a scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanLogs {
    pub logs: Vec<LogEntry>,
}

impl ScanLogs {
    /// Accepts `{"logs": [...]}` or a bare array.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let entries = match value {
            Value::Array(items) => Some(items),
            other => probe_array(other, &["logs"]),
        };
        Self {
            logs: entries
                .map(|items| items.iter().map(LogEntry::from_value).collect())
                .unwrap_or_default(),
        }
    }

    /// Whether any readiness keyword appears anywhere in the serialized log.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        let text = serde_json::to_string(&self.logs)
            .unwrap_or_default()
            .to_lowercase();
        READY_KEYWORDS.iter().any(|keyword| text.contains(keyword))
    }

    /// Timestamp and status of the most recent entry, joined by a dash.
    ///
    /// `None` when there are no entries or the last one carries no status.
    #[must_use]
    pub fn last_message(&self) -> Option<String> {
        self.logs
            .last()
            .filter(|entry| !entry.status.trim().is_empty())
            .map(|entry| format!("{} — {}", entry.timestamp, entry.status))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}

/// Result of the save-then-read fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedReport {
    /// Where the service stored the report
    pub path: String,
    pub data: Option<Value>,
}

impl SavedReport {
    /// Payload is `data` when present, else the whole response; path is
    /// `path` when present, else `/reports/json/<hash>`.
    #[must_use]
    pub fn from_raw(raw: Value, hash: &str) -> Self {
        let path =
            probe_text(&raw, &["path"]).unwrap_or_else(|| format!("/reports/json/{hash}"));
        let data = match probe(&raw, &["data"]) {
            Some(data) => Some(data.clone()),
            None if is_present(&raw) => Some(raw),
            None => None,
        };
        Self { path, data }
    }
}

/// One critical finding in the condensed summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrucialFinding {
    pub path: String,
    pub snippet: String,
}

/// Condensed critical findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrucialSummary {
    pub count: usize,
    pub findings: Vec<CrucialFinding>,
}

impl CrucialSummary {
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let findings: Vec<CrucialFinding> = probe_array(value, &["findings"])
            .map(|items| {
                items
                    .iter()
                    .filter(|item| is_present(item))
                    .map(|item| CrucialFinding {
                        path: probe_text(item, &["path", "file"]).unwrap_or_default(),
                        snippet: probe_text(item, &["snippet", "match"])
                            .unwrap_or_else(|| value_text(item)),
                    })
                    .collect()
            })
            .unwrap_or_default();
        let count = probe(value, &["count"])
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(findings.len());
        Self { count, findings }
    }
}

/// A previously completed scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanListing {
    pub hash: String,
    pub app_name: String,
    pub file_name: String,
    pub package_name: String,
    pub scan_type: String,
    pub timestamp: String,
}

impl ScanListing {
    /// Entries under `content` (or a bare array); entries without an
    /// identity are skipped.
    #[must_use]
    pub fn list_from_value(value: &Value) -> Vec<Self> {
        let items = match value {
            Value::Array(items) => Some(items),
            other => probe_array(other, &["content", "scans"]),
        };
        items
            .map(|items| items.iter().filter_map(Self::from_value).collect())
            .unwrap_or_default()
    }

    fn from_value(item: &Value) -> Option<Self> {
        let hash = probe_text(item, aliases::IDENTITY)?;
        Some(Self {
            hash,
            app_name: aliases::APP_NAME.extract(item),
            file_name: aliases::FILE_NAME.extract(item),
            package_name: aliases::PACKAGE_NAME.extract(item),
            scan_type: probe_text(item, &["scan_type", "SCAN_TYPE"]).unwrap_or_default(),
            timestamp: probe_text(item, &["timestamp", "TIMESTAMP"]).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upload_identity_aliases() {
        let resp = UploadResponse::from_raw(json!({"MD5": "abc", "file_name": "x.apk"})).unwrap();
        assert_eq!(resp.identity, "abc");

        let resp = UploadResponse::from_raw(json!({"hash": "", "md5": "def"})).unwrap();
        assert_eq!(resp.identity, "def");
    }

    #[test]
    fn test_upload_without_identity_is_transport_error() {
        let err = UploadResponse::from_raw(json!({"status": "ok"})).unwrap_err();
        assert!(matches!(
            err,
            MobscanError::Transport {
                source: TransportErrorKind::MissingIdentity,
                ..
            }
        ));
    }

    #[test]
    fn test_logs_parse_and_last_message() {
        let logs = ScanLogs::from_value(&json!({"logs": [
            {"timestamp": "2024-05-01 10:00:00", "status": "Unzipping", "exception": null},
            {"timestamp": "2024-05-01 10:00:05", "status": "Decompiling APK"}
        ]}));
        assert_eq!(logs.len(), 2);
        assert_eq!(logs.logs[0].exception, None);
        assert_eq!(
            logs.last_message().as_deref(),
            Some("2024-05-01 10:00:05 — Decompiling APK")
        );
        assert!(!logs.is_ready());
    }

    #[test]
    fn test_last_message_needs_a_status() {
        let logs = ScanLogs::from_value(&json!({"logs": [
            {"timestamp": "2024-05-01 10:00:00", "status": "Unzipping"},
            {"timestamp": "2024-05-01 10:00:05"}
        ]}));
        assert_eq!(logs.last_message(), None);
        assert_eq!(ScanLogs::default().last_message(), None);
    }

    #[test]
    fn test_readiness_is_case_insensitive_over_whole_entry() {
        let logs = ScanLogs {
            logs: vec![LogEntry::new("t1", "Unzipping"), LogEntry::new("t2", "Saving to Database")],
        };
        assert!(logs.is_ready());

        let mut entry = LogEntry::new("t3", "working");
        entry
            .extra
            .insert("detail".into(), json!("Report Generated"));
        assert!(ScanLogs { logs: vec![entry] }.is_ready());
    }

    #[test]
    fn test_logs_tolerate_odd_shapes() {
        assert!(ScanLogs::from_value(&json!({"logs": "none"})).is_empty());
        assert!(ScanLogs::from_value(&json!(null)).is_empty());
        let logs = ScanLogs::from_value(&json!(["plain line", {"status": 3}]));
        assert_eq!(logs.logs[0].status, "plain line");
        assert_eq!(logs.logs[1].status, "3");
    }

    #[test]
    fn test_saved_report_fallbacks() {
        let saved = SavedReport::from_raw(json!({"path": "/srv/r.json", "data": {"a": 1}}), "h");
        assert_eq!(saved.path, "/srv/r.json");
        assert_eq!(saved.data, Some(json!({"a": 1})));

        let saved = SavedReport::from_raw(json!({"app_name": "X"}), "h1");
        assert_eq!(saved.path, "/reports/json/h1");
        assert_eq!(saved.data, Some(json!({"app_name": "X"})));

        assert_eq!(SavedReport::from_raw(Value::Null, "h").data, None);
    }

    #[test]
    fn test_crucial_summary() {
        let summary = CrucialSummary::from_value(&json!({
            "count": 5,
            "findings": [{"path": "a/B.java", "snippet": "key = \"x\""}, null]
        }));
        assert_eq!(summary.count, 5);
        assert_eq!(summary.findings.len(), 1);
        assert_eq!(summary.findings[0].path, "a/B.java");

        let summary = CrucialSummary::from_value(&json!({"findings": [{"path": "p", "snippet": "s"}]}));
        assert_eq!(summary.count, 1);
    }

    #[test]
    fn test_scan_listing() {
        let listings = ScanListing::list_from_value(&json!({"content": [
            {"MD5": "aa", "APP_NAME": "Demo", "FILE_NAME": "demo.apk", "SCAN_TYPE": "apk",
             "PACKAGE_NAME": "com.demo", "TIMESTAMP": "2024-05-01"},
            {"APP_NAME": "no identity"}
        ]}));
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].hash, "aa");
        assert_eq!(listings[0].app_name, "Demo");
        assert_eq!(listings[0].scan_type, "apk");
    }
}
