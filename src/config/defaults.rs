//! Default values for mobscan configuration.

/// Base URL of a locally running scanning service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Request timeout for service calls.
pub const DEFAULT_TIMEOUT: &str = "120s";

/// Interval between log polls.
pub const DEFAULT_POLL_INTERVAL: &str = "5s";

/// Poll attempts before a scan is given up on.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 120;

/// Wall-clock budget for a single scan.
pub const DEFAULT_MAX_POLL_DURATION: &str = "15m";

/// Header carrying the service API key.
pub const DEFAULT_API_KEY_HEADER: &str = "Authorization";

pub const ENDPOINT_UPLOAD: &str = "/api/v1/upload";
pub const ENDPOINT_SCAN: &str = "/api/v1/scan";
pub const ENDPOINT_SCAN_LOGS: &str = "/api/v1/scan_logs";
pub const ENDPOINT_REPORT_JSON: &str = "/api/v1/report_json";
pub const ENDPOINT_DOWNLOAD_PDF: &str = "/api/v1/download_pdf";
pub const ENDPOINT_SCANS: &str = "/api/v1/scans";
