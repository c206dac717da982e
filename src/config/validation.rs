//! Configuration validation.

use super::types::{AppConfig, OutputConfig, PollingConfig, RemediationConfig, ServiceConfig};
use crate::lifecycle::parse_duration;
use regex::RegexBuilder;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.service.validate());
        errors.extend(self.polling.validate());
        errors.extend(self.output.validate());
        errors.extend(self.remediation.validate());
        errors
    }
}

impl Validatable for ServiceConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            errors.push(ConfigError::new(
                "service.base_url",
                format!("Expected an http(s) URL, got '{}'", self.base_url),
            ));
        }

        match parse_duration(&self.timeout) {
            Ok(timeout) if timeout.is_zero() => {
                errors.push(ConfigError::new("service.timeout", "Timeout must be non-zero"));
            }
            Ok(_) => {}
            Err(e) => errors.push(ConfigError::new("service.timeout", e.to_string())),
        }

        if self.api_key.is_some() && self.api_key_header.trim().is_empty() {
            errors.push(ConfigError::new(
                "service.api_key_header",
                "Header name must not be empty when an API key is set",
            ));
        }

        let endpoints = &self.endpoints;
        let required = [
            ("upload", &endpoints.upload),
            ("scan", &endpoints.scan),
            ("scan_logs", &endpoints.scan_logs),
            ("report_json", &endpoints.report_json),
            ("download_pdf", &endpoints.download_pdf),
            ("scans", &endpoints.scans),
        ];
        let optional = [
            ("save_report_json", endpoints.save_report_json.as_ref()),
            ("crucial", endpoints.crucial.as_ref()),
        ];
        for (name, path) in required
            .into_iter()
            .map(|(n, p)| (n, Some(p)))
            .chain(optional)
        {
            if let Some(path) = path {
                if !path.starts_with('/') {
                    errors.push(ConfigError::new(
                        format!("service.endpoints.{name}"),
                        format!("Endpoint path must start with '/', got '{path}'"),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for PollingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        match parse_duration(&self.interval) {
            Ok(interval) if interval.is_zero() => {
                errors.push(ConfigError::new("polling.interval", "Interval must be non-zero"));
            }
            Ok(_) => {}
            Err(e) => errors.push(ConfigError::new("polling.interval", e.to_string())),
        }

        if let Err(e) = parse_duration(&self.max_duration) {
            errors.push(ConfigError::new("polling.max_duration", e.to_string()));
        }

        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(parent) = self.file.as_ref().and_then(|file| file.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError::new(
                    "output.file",
                    format!("Parent directory does not exist: {}", parent.display()),
                ));
            }
        }

        errors
    }
}

impl Validatable for RemediationConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (idx, rule) in self.rules.iter().enumerate() {
            let field = format!("remediation.rules[{idx}]");
            if let Err(e) = RegexBuilder::new(&rule.pattern)
                .case_insensitive(true)
                .build()
            {
                errors.push(ConfigError::new(
                    format!("{field}.pattern"),
                    format!("Invalid pattern '{}': {e}", rule.pattern),
                ));
            }
            if rule.fix.trim().is_empty() {
                errors.push(ConfigError::new(
                    format!("{field}.fix"),
                    format!("Rule '{}' has empty fix text", rule.display_name()),
                ));
            }
        }

        errors
    }
}
