//! Configuration types for mobscan.

use super::defaults::{
    DEFAULT_API_KEY_HEADER, DEFAULT_BASE_URL, DEFAULT_MAX_POLL_ATTEMPTS,
    DEFAULT_MAX_POLL_DURATION, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, ENDPOINT_DOWNLOAD_PDF,
    ENDPOINT_REPORT_JSON, ENDPOINT_SCAN, ENDPOINT_SCANS, ENDPOINT_SCAN_LOGS, ENDPOINT_UPLOAD,
};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from a YAML file and overridden by CLI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Scanning service connection
    pub service: ServiceConfig,
    /// Log polling cadence and budget
    pub polling: PollingConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Extra remediation rules
    pub remediation: RemediationConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.service.base_url = url.into();
        self
    }

    pub fn api_key(mut self, key: Option<String>) -> Self {
        self.config.service.api_key = key;
        self
    }

    pub fn poll_interval(mut self, interval: impl Into<String>) -> Self {
        self.config.polling.interval = interval.into();
        self
    }

    pub const fn max_poll_attempts(mut self, attempts: u32) -> Self {
        self.config.polling.max_attempts = attempts;
        self
    }

    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    pub const fn fail_on_high(mut self, fail: bool) -> Self {
        self.config.output.fail_on_high = fail;
        self
    }

    pub fn remediation_rule(mut self, rule: RemediationRuleConfig) -> Self {
        self.config.remediation.rules.push(rule);
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Service Configuration
// ============================================================================

/// Connection settings for the scanning service.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL, e.g. `http://localhost:8000`
    pub base_url: String,
    /// API key sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Header name for the API key
    pub api_key_header: String,
    /// Request timeout (e.g. "120s")
    pub timeout: String,
    /// Endpoint paths relative to `base_url`
    pub endpoints: EndpointConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            timeout: DEFAULT_TIMEOUT.to_string(),
            endpoints: EndpointConfig::default(),
        }
    }
}

/// Endpoint paths. Optional endpoints are unavailable when unset.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EndpointConfig {
    pub upload: String,
    pub scan: String,
    pub scan_logs: String,
    pub report_json: String,
    /// Save-then-read endpoint used when the direct report read fails
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_report_json: Option<String>,
    pub download_pdf: String,
    /// Condensed critical-findings endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crucial: Option<String>,
    pub scans: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            upload: ENDPOINT_UPLOAD.to_string(),
            scan: ENDPOINT_SCAN.to_string(),
            scan_logs: ENDPOINT_SCAN_LOGS.to_string(),
            report_json: ENDPOINT_REPORT_JSON.to_string(),
            save_report_json: None,
            download_pdf: ENDPOINT_DOWNLOAD_PDF.to_string(),
            crucial: None,
            scans: ENDPOINT_SCANS.to_string(),
        }
    }
}

// ============================================================================
// Polling Configuration
// ============================================================================

/// Log polling cadence and budget. A zero limit disables that limit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PollingConfig {
    /// Interval between log fetches (e.g. "5s", "500ms")
    pub interval: String,
    /// Maximum number of log fetches
    pub max_attempts: u32,
    /// Maximum wall-clock time spent polling (e.g. "15m")
    pub max_duration: String,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL.to_string(),
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            max_duration: DEFAULT_MAX_POLL_DURATION.to_string(),
        }
    }
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Output-related configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
    /// Exit with code 2 when high-severity findings are present
    pub fail_on_high: bool,
}

// ============================================================================
// Remediation Configuration
// ============================================================================

/// User-supplied remediation rules, tried before the built-in ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RemediationConfig {
    pub rules: Vec<RemediationRuleConfig>,
}

/// One remediation rule: a case-insensitive regex over finding titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RemediationRuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub pattern: String,
    pub fix: String,
}

impl RemediationRuleConfig {
    /// Name for messages; falls back to the pattern.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.pattern)
    }
}
