//! Finding collection and per-finding normalization.

use super::aliases::{
    is_present, probe, probe_array, probe_text, value_text, API_FINDINGS, FINDING_DESCRIPTION,
    FINDING_PATH, FINDING_REMEDIATION, FINDING_SEVERITY, FINDING_TITLE, FINDING_TITLE_FALLBACK,
    MANIFEST_FINDINGS, MANIFEST_SECTION, VULNERABILITIES,
};
use crate::model::Finding;
use serde_json::Value;

/// Characters of serialized JSON used as a last-resort title.
const JSON_TITLE_CHARS: usize = 60;

/// Title used when even the JSON fallback comes out empty.
const UNTITLED: &str = "(untitled finding)";

/// Gather candidate entries from the three known locations, in display order:
/// manifest findings, API findings, then generic vulnerabilities.
pub(super) fn collect_candidates(raw: &Value) -> Vec<&Value> {
    let manifest = probe(raw, MANIFEST_SECTION)
        .and_then(|section| probe_array(section, MANIFEST_FINDINGS));
    let api = probe_array(raw, API_FINDINGS);
    let vulnerabilities = probe_array(raw, VULNERABILITIES);

    [manifest, api, vulnerabilities]
        .into_iter()
        .flatten()
        .flat_map(|list| list.iter())
        .filter(|candidate| is_candidate(candidate))
        .collect()
}

/// Null, `false`, zero and blank strings are not findings.
fn is_candidate(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.trim().is_empty(),
        other => is_present(other),
    }
}

/// Map one candidate onto the canonical finding shape.
pub(super) fn normalize_finding(candidate: &Value) -> Finding {
    let raw_severity = probe_text(candidate, FINDING_SEVERITY).unwrap_or_default();

    Finding::new(finding_title(candidate), raw_severity)
        .with_description(probe_text(candidate, FINDING_DESCRIPTION).unwrap_or_default())
        .with_path(probe_text(candidate, FINDING_PATH).unwrap_or_default())
        .with_remediation(probe_text(candidate, FINDING_REMEDIATION))
}

fn finding_title(candidate: &Value) -> String {
    let title = probe_text(candidate, FINDING_TITLE)
        .or_else(|| match candidate {
            Value::String(s) => Some(s.clone()),
            _ => probe_text(candidate, FINDING_TITLE_FALLBACK),
        })
        .unwrap_or_else(|| value_text(candidate).chars().take(JSON_TITLE_CHARS).collect());

    if title.trim().is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeverityTier;
    use serde_json::json;

    #[test]
    fn test_collect_order_manifest_api_vulns() {
        let raw = json!({
            "vulnerabilities": [{"title": "third"}],
            "api": [{"title": "second"}],
            "manifest_analysis": {"manifest_findings": [{"title": "first"}]},
        });
        let titles: Vec<String> = collect_candidates(&raw)
            .into_iter()
            .map(normalize_finding)
            .map(|f| f.title)
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_collect_drops_null_and_blank_entries() {
        let raw = json!({
            "manifest": {"findings": [null, "", "   ", "Bare string finding"]},
            "api_findings": [false, {"name": "kept"}],
        });
        let candidates = collect_candidates(&raw);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_normalize_finding_aliases() {
        let finding = normalize_finding(&json!({
            "check": "Cleartext traffic",
            "level": "Warning",
            "details": "usesCleartextTraffic=true",
            "component": "AndroidManifest.xml",
            "fix": "Disable cleartext traffic",
        }));
        assert_eq!(finding.title, "Cleartext traffic");
        assert_eq!(finding.severity, SeverityTier::Medium);
        assert_eq!(finding.raw_severity, "warning");
        assert_eq!(finding.description, "usesCleartextTraffic=true");
        assert_eq!(finding.path, "AndroidManifest.xml");
        assert_eq!(finding.remediation.as_deref(), Some("Disable cleartext traffic"));
    }

    #[test]
    fn test_title_fallbacks() {
        assert_eq!(finding_title(&json!("plain text")), "plain text");
        assert_eq!(finding_title(&json!({"rule": "android_logging"})), "android_logging");

        let long = json!({"metadata": {"cwe": "CWE-312", "owasp": "M9", "notes": "x".repeat(100)}});
        let title = finding_title(&long);
        assert_eq!(title.chars().count(), JSON_TITLE_CHARS);
        assert!(title.starts_with("{\"metadata\""));

        assert_eq!(finding_title(&json!(42)), "42");
    }

    #[test]
    fn test_missing_severity_is_info() {
        let finding = normalize_finding(&json!({"title": "No severity"}));
        assert_eq!(finding.raw_severity, "info");
        assert_eq!(finding.severity, SeverityTier::Info);
        assert!(finding.remediation.is_none());
        assert_eq!(finding.path, "");
    }
}
