//! Dangerous permission entries.

use serde::{Deserialize, Serialize};

/// A requested permission flagged as dangerous or privacy sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRisk {
    /// Permission key as it appeared in the report, e.g. `android.permission.CAMERA`
    pub name: String,
    pub info: String,
}
