//! Configuration for mobscan.
//!
//! Settings come from a YAML file (discovered in the working directory, the
//! git root, `~/.config/mobscan/` or the home directory) and are overridden
//! by CLI flags and the `MOBSCAN_URL` / `MOBSCAN_API_KEY` environment
//! variables.
//!
//! ```yaml
//! service:
//!   base_url: http://localhost:8000
//! polling:
//!   interval: 5s
//!   max_attempts: 120
//! remediation:
//!   rules:
//!     - pattern: firebase
//!       fix: Restrict Firebase database rules to authenticated users.
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEFAULT_BASE_URL, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_MAX_POLL_DURATION, DEFAULT_POLL_INTERVAL,
};
pub use types::{
    AppConfig, AppConfigBuilder, EndpointConfig, OutputConfig, PollingConfig, RemediationConfig,
    RemediationRuleConfig, ServiceConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// JSON Schema for `.mobscan.yaml`, for editor validation and completion.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_mentions_sections() {
        let schema = generate_json_schema();
        assert!(schema.contains("\"service\""));
        assert!(schema.contains("\"polling\""));
        assert!(schema.contains("\"remediation\""));
    }
}
