//! Declarative alias probing.
//!
//! The scanning service is not consistent about key names (`app_name` vs
//! `APP_NAME`, `hash` vs `MD5`), so every logical field is described by an
//! ordered list of candidate keys. [`probe`] takes the first key whose value
//! is present.

use serde_json::Value;

/// Candidate keys for one logical field, plus what to show when none match.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub keys: &'static [&'static str],
    pub placeholder: &'static str,
}

impl FieldAliases {
    /// Extract the field as display text, falling back to the placeholder.
    #[must_use]
    pub fn extract(&self, raw: &Value) -> String {
        probe_text(raw, self.keys).unwrap_or_else(|| self.placeholder.to_string())
    }
}

// Overview metadata
pub const APP_NAME: FieldAliases = FieldAliases {
    keys: &["app_name", "APP_NAME", "file_name", "file"],
    placeholder: "(unknown)",
};
pub const FILE_NAME: FieldAliases = FieldAliases {
    keys: &["file_name", "FILE_NAME"],
    placeholder: "(unknown)",
};
pub const SIZE: FieldAliases = FieldAliases {
    keys: &["size", "file_size", "apk_size"],
    placeholder: "unknown",
};
pub const PACKAGE_NAME: FieldAliases = FieldAliases {
    keys: &["package_name", "PACKAGE_NAME"],
    placeholder: "(unknown)",
};
pub const VERSION_NAME: FieldAliases = FieldAliases {
    keys: &["version_name", "VERSION_NAME"],
    placeholder: "-",
};
pub const TARGET_SDK: FieldAliases = FieldAliases {
    keys: &["target_sdk", "TargetSdkVersion"],
    placeholder: "-",
};
pub const MIN_SDK: FieldAliases = FieldAliases {
    keys: &["min_sdk", "MinSdkVersion"],
    placeholder: "-",
};
pub const HASH: FieldAliases = FieldAliases {
    keys: &["hash", "MD5", "md5"],
    placeholder: "(n/a)",
};

// Finding locations
pub const MANIFEST_SECTION: &[&str] = &["manifest_analysis", "Manifest", "manifest"];
pub const MANIFEST_FINDINGS: &[&str] = &["manifest_findings", "findings"];
pub const API_FINDINGS: &[&str] = &["api", "api_findings"];
pub const VULNERABILITIES: &[&str] = &["vulnerabilities"];

// Finding fields
pub const FINDING_TITLE: &[&str] = &["title", "name", "check", "issue"];
pub const FINDING_TITLE_FALLBACK: &[&str] = &["issue_title", "rule"];
pub const FINDING_SEVERITY: &[&str] = &["severity", "level", "risk"];
pub const FINDING_DESCRIPTION: &[&str] =
    &["description", "desc", "details", "message", "snippet", "detail"];
pub const FINDING_PATH: &[&str] = &["path", "file", "location", "component"];
pub const FINDING_REMEDIATION: &[&str] = &[
    "remediation",
    "fix",
    "recommendation",
    "fix_recommendation",
    "remediation_text",
];

// Permissions
pub const PERMISSIONS: &[&str] = &["permissions", "Permission", "manifest_permissions"];
pub const PERMISSION_STATUS: &[&str] = &["status", "level", "risk", "description"];

// Upload response identity
pub const IDENTITY: &[&str] = &["hash", "MD5", "md5"];

/// Whether a value counts as present.
///
/// Null, `false`, the empty string and the number zero are absent; every
/// other value (including empty arrays and objects) is present.
#[must_use]
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => true,
    }
}

/// First present value among `keys`. Non-object input yields `None`.
#[must_use]
pub fn probe<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let object = raw.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| is_present(value))
}

/// Like [`probe`] but rendered as display text.
#[must_use]
pub fn probe_text(raw: &Value, keys: &[&str]) -> Option<String> {
    probe(raw, keys).map(value_text)
}

/// First value among `keys` that is a JSON array.
#[must_use]
pub fn probe_array<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    let object = raw.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(Value::as_array)
}

/// Strings as-is, everything else as compact JSON.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_probe_takes_first_present_alias() {
        let raw = json!({"APP_NAME": "Upper", "file_name": "app.apk"});
        assert_eq!(APP_NAME.extract(&raw), "Upper");

        let raw = json!({"app_name": "", "APP_NAME": null, "file_name": "app.apk"});
        assert_eq!(APP_NAME.extract(&raw), "app.apk");
    }

    #[test]
    fn test_probe_placeholder_when_absent() {
        assert_eq!(HASH.extract(&json!({})), "(n/a)");
        assert_eq!(VERSION_NAME.extract(&json!([1, 2])), "-");
        assert_eq!(SIZE.extract(&Value::Null), "unknown");
    }

    #[test]
    fn test_numbers_render_as_text() {
        let raw = json!({"target_sdk": 33, "min_sdk": 0});
        assert_eq!(TARGET_SDK.extract(&raw), "33");
        // zero counts as absent
        assert_eq!(MIN_SDK.extract(&raw), "-");
    }

    #[test]
    fn test_probe_array_skips_non_arrays() {
        let raw = json!({"api": {"not": "a list"}, "api_findings": [1]});
        assert_eq!(probe_array(&raw, API_FINDINGS).map(Vec::len), Some(1));
    }

    #[test]
    fn test_is_present() {
        assert!(!is_present(&json!(null)));
        assert!(!is_present(&json!(false)));
        assert!(!is_present(&json!("")));
        assert!(!is_present(&json!(0)));
        assert!(is_present(&json!(" ")));
        assert!(is_present(&json!([])));
        assert!(is_present(&json!({})));
        assert!(is_present(&json!(true)));
    }
}
