//! go.mod access through the `go` command
//!
//! Handles:
//! - reading requirements via `go mod edit -json`
//! - `go get`, `go mod tidy` and `go mod vendor`
//! - detecting a vendored module via `vendor/modules.txt`

use crate::domain::DependencyRecord;
use crate::error::ManifestError;
use crate::exec::CommandRunner;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::Path;

/// Sentinel file written by `go mod vendor`
pub const VENDOR_MANIFEST: &str = "vendor/modules.txt";

/// Shape of `go mod edit -json` (see `go help mod edit`)
#[derive(Debug, Deserialize)]
struct GoModJson {
    #[serde(rename = "Require", default)]
    require: Option<Vec<Requirement>>,
}

#[derive(Debug, Deserialize)]
struct Requirement {
    #[serde(rename = "Path")]
    path: String,
    #[serde(rename = "Version")]
    version: String,
    #[serde(rename = "Indirect", default)]
    indirect: bool,
}

/// Parse `go mod edit -json` output into dependency records
pub fn parse_requirements(json: &str) -> Result<Vec<DependencyRecord>, ManifestError> {
    let parsed: GoModJson =
        serde_json::from_str(json).map_err(|e| ManifestError::invalid_json(e.to_string()))?;

    Ok(parsed
        .require
        .unwrap_or_default()
        .into_iter()
        .map(|req| DependencyRecord {
            path: req.path,
            version: req.version,
            indirect: req.indirect,
        })
        .collect())
}

/// Wrapper around the `go` manifest tool
pub struct GoModTool<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> GoModTool<'a> {
    /// Create a tool that runs `go` through `runner`
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Read the pinned version of `path`
    ///
    /// Used both before and after `go get` so the two versions are comparable.
    pub fn read_dependency(&self, path: &str) -> Result<DependencyRecord, ManifestError> {
        let json = self.runner.output("go", &["mod", "edit", "-json"])?;
        parse_requirements(&json)?
            .into_iter()
            .find(|dep| dep.path == path)
            .ok_or_else(|| ManifestError::not_found(path))
    }

    /// `go get <target>`
    pub fn get(&self, target: &str) -> Result<(), ManifestError> {
        self.runner.run("go", &["get", target])?;
        Ok(())
    }

    /// `go mod tidy`
    pub fn tidy(&self) -> Result<(), ManifestError> {
        self.runner.run("go", &["mod", "tidy"])?;
        Ok(())
    }

    /// `go mod vendor`
    pub fn vendor(&self) -> Result<(), ManifestError> {
        self.runner.run("go", &["mod", "vendor"])?;
        Ok(())
    }

    /// Whether the module under `dir` keeps a vendor directory
    pub fn is_vendored(&self, dir: &Path) -> Result<bool, ManifestError> {
        let sentinel = dir.join(VENDOR_MANIFEST);
        match std::fs::metadata(&sentinel) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ManifestError::VendorProbe {
                path: sentinel,
                source: e,
            }),
        }
    }
}
