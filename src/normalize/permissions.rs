//! Dangerous permission extraction.

use super::aliases::{is_present, probe, probe_text, value_text, PERMISSIONS, PERMISSION_STATUS};
use crate::model::PermissionRisk;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static DANGEROUS_STATUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(dangerous|danger|privileged)").expect("static regex is valid")
});

static SENSITIVE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(WRITE|RECORD|CALL|SMS|LOCATION|CAMERA|STORAGE|CONTACTS)")
        .expect("static regex is valid")
});

/// Permissions whose status reads dangerous/privileged, or whose name
/// touches a sensitive capability. Source order is preserved.
pub(super) fn extract_permissions(raw: &Value) -> Vec<PermissionRisk> {
    let Some(entries) = probe(raw, PERMISSIONS).and_then(Value::as_object) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter(|(_, value)| is_present(value))
        .filter(|(name, value)| {
            DANGEROUS_STATUS.is_match(&status_text(value)) || SENSITIVE_NAME.is_match(name)
        })
        .map(|(name, value)| PermissionRisk {
            name: name.clone(),
            info: permission_info(value),
        })
        .collect()
}

fn status_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => probe_text(other, PERMISSION_STATUS).unwrap_or_default(),
    }
}

fn permission_info(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => probe_text(other, &["description"]).unwrap_or_else(|| value_text(other)),
    }
}
