//! Dependency record read from go.mod

use serde::{Deserialize, Serialize};
use std::fmt;

/// A module requirement as reported by `go mod edit -json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Module path
    pub path: String,
    /// Pinned version (tag or pseudo-version)
    pub version: String,
    /// Whether go.mod marks the requirement `// indirect`
    #[serde(default)]
    pub indirect: bool,
}

impl DependencyRecord {
    /// Creates a new direct dependency record
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
            indirect: false,
        }
    }

    /// Returns true if both records pin the same version
    pub fn same_version(&self, other: &DependencyRecord) -> bool {
        self.version == other.version
    }
}

impl fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.indirect { " (indirect)" } else { "" };
        write!(f, "{}@{}{}", self.path, self.version, marker)
    }
}
