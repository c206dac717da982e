//! Report normalization.
//!
//! Turns an arbitrarily shaped report payload into a [`NormalizedReport`].
//! Normalization is total: missing or oddly typed fields degrade to
//! placeholders, never to an error.
//!
//! # Example
//!
//! ```
//! use mobscan::normalize::normalize;
//! use serde_json::json;
//!
//! let report = normalize(&json!({
//!     "APP_NAME": "Diva",
//!     "vulnerabilities": [{"title": "Hardcoded API key", "severity": "high"}],
//! }));
//! assert_eq!(report.metadata.app_name, "Diva");
//! assert_eq!(report.metadata.hash, "(n/a)");
//! assert_eq!(report.findings.len(), 1);
//! ```

pub mod aliases;
mod findings;
mod metadata;
mod permissions;

use crate::error::Result;
use crate::model::NormalizedReport;
use serde_json::Value;

/// Normalize a raw report payload. Never fails.
#[must_use]
pub fn normalize(raw: &Value) -> NormalizedReport {
    let findings: Vec<_> = findings::collect_candidates(raw)
        .into_iter()
        .map(findings::normalize_finding)
        .collect();

    tracing::debug!(findings = findings.len(), "normalized report");

    NormalizedReport {
        metadata: metadata::extract_metadata(raw),
        findings,
        permissions: permissions::extract_permissions(raw),
    }
}

/// Parse JSON text and normalize it.
///
/// Only text that is not JSON at all is an error; any JSON value, even a
/// bare number, normalizes to a placeholder-filled report.
pub fn normalize_str(text: &str) -> Result<NormalizedReport> {
    let raw: Value = serde_json::from_str(text)?;
    Ok(normalize(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MobscanError;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_all_placeholders() {
        let report = normalize(&json!({}));
        assert_eq!(report.metadata.app_name, "(unknown)");
        assert_eq!(report.metadata.file_name, "(unknown)");
        assert_eq!(report.metadata.size, "unknown");
        assert_eq!(report.metadata.package_name, "(unknown)");
        assert_eq!(report.metadata.version_name, "-");
        assert_eq!(report.metadata.target_sdk, "-");
        assert_eq!(report.metadata.min_sdk, "-");
        assert_eq!(report.metadata.hash, "(n/a)");
        assert!(report.findings.is_empty());
        assert!(report.permissions.is_empty());
        assert!(report.is_empty());
    }

    #[test]
    fn test_non_object_input_does_not_panic() {
        for raw in [json!(null), json!([1, 2, 3]), json!("text"), json!(7)] {
            let report = normalize(&raw);
            assert_eq!(report.metadata.hash, "(n/a)");
            assert!(report.findings.is_empty());
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let raw = json!({
            "app_name": "Demo",
            "api": [{"title": "WebView JS enabled", "severity": "warning"}],
            "permissions": {"android.permission.CAMERA": "dangerous"},
        });
        assert_eq!(normalize(&raw), normalize(&raw));
    }

    #[test]
    fn test_normalize_str_rejects_non_json() {
        let err = normalize_str("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, MobscanError::MalformedReport(_)));

        let report = normalize_str("42").unwrap();
        assert!(report.findings.is_empty());
    }
}
