//! Configuration file loading and discovery.

use super::defaults::DEFAULT_BASE_URL;
use super::types::AppConfig;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".mobscan.yaml",
    ".mobscan.yml",
    "mobscan.yaml",
    "mobscan.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/mobscan/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path.filter(|p| p.exists()) {
        return Some(path.to_path_buf());
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) = dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join("mobscan")))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge CLI overrides into this config. Only values that differ from
    /// the defaults override.
    pub fn merge(&mut self, other: &Self) {
        if other.service.base_url != DEFAULT_BASE_URL {
            self.service.base_url.clone_from(&other.service.base_url);
        }
        if other.service.api_key.is_some() {
            self.service.api_key.clone_from(&other.service.api_key);
        }

        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if other.output.fail_on_high {
            self.output.fail_on_high = true;
        }

        // CLI rules go first so they win over file rules
        if !other.remediation.rules.is_empty() {
            let mut rules = other.remediation.rules.clone();
            rules.append(&mut self.remediation.rules);
            self.remediation.rules = rules;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Commented example config written by `mobscan config init`.
#[must_use]
pub fn generate_example_config() -> String {
    r#"# mobscan configuration
# Place this file at .mobscan.yaml in your project root or ~/.config/mobscan/mobscan.yaml
# CLI flags and MOBSCAN_URL / MOBSCAN_API_KEY override these values.

service:
  base_url: http://localhost:8000
  # api_key: <your MobSF REST API key>
  api_key_header: Authorization
  timeout: 120s
  endpoints:
    upload: /api/v1/upload
    scan: /api/v1/scan
    scan_logs: /api/v1/scan_logs
    report_json: /api/v1/report_json
    # save_report_json: /api/v1/save_report_json
    download_pdf: /api/v1/download_pdf
    # crucial: /api/v1/crucial
    scans: /api/v1/scans

polling:
  interval: 5s
  # 0 disables a limit
  max_attempts: 120
  max_duration: 15m

output:
  # Format: auto, tui, summary, json, markdown
  format: auto
  no_color: false
  fail_on_high: false

remediation:
  rules: []
  # - name: firebase
  #   pattern: firebase
  #   fix: Restrict Firebase database rules to authenticated users.
"#
    .to_string()
}
