//! Validated run configuration

use crate::error::ConfigError;
use serde::Serialize;

/// Environment variable holding the hosting API token unless `-token` says otherwise
pub const DEFAULT_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Branch pull requests target unless `-base` says otherwise
pub const DEFAULT_BASE_BRANCH: &str = "master";

/// Everything a run needs, fixed before the first side effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunConfig {
    /// Module path of the dependency to bump
    pub path: String,
    /// Requested version; `None` means latest
    pub version: Option<String>,
    /// Push the update branch to origin
    pub push: bool,
    /// Open a pull request after pushing
    pub pull_request: bool,
    /// Name of the environment variable holding the token
    pub token_var: String,
    /// Token value, resolved from `token_var`
    #[serde(skip)]
    pub token: Option<String>,
    /// Base branch for pull requests
    pub base: String,
    /// Command to run after the upgrade, before committing
    pub post_command: Vec<String>,
    /// Debug logging
    pub verbose: bool,
}

impl RunConfig {
    /// Creates a configuration with defaults for everything but the path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: None,
            push: true,
            pull_request: true,
            token_var: DEFAULT_TOKEN_VAR.to_string(),
            token: None,
            base: DEFAULT_BASE_BRANCH.to_string(),
            post_command: Vec::new(),
            verbose: false,
        }
    }

    /// Checks invariants that clap cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::EmptyPath);
        }
        if self
            .post_command
            .first()
            .is_some_and(|program| program.trim().is_empty())
        {
            return Err(ConfigError::EmptyCommand);
        }
        Ok(())
    }

    /// Argument for `go get`: `path` or `path@version`
    pub fn upgrade_target(&self) -> String {
        match &self.version {
            Some(version) => format!("{}@{}", self.path, version),
            None => self.path.clone(),
        }
    }
}
