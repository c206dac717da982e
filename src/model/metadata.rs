//! Application overview metadata.

use serde::{Deserialize, Serialize};

/// Overview fields of the scanned application.
///
/// Every field is always populated; fields the report does not carry hold
/// a placeholder such as `(unknown)` or `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    pub app_name: String,
    pub file_name: String,
    pub size: String,
    pub package_name: String,
    pub version_name: String,
    pub target_sdk: String,
    pub min_sdk: String,
    pub hash: String,
}
