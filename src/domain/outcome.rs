//! Terminal states of a run

use serde::Serialize;
use std::fmt;

/// Reason why no pull request was opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrSkipReason {
    /// The branch is not pushed, so there is nothing to propose
    PushDisabled,
    /// Pull requests disabled with -nopr
    Disabled,
    /// The token environment variable is unset or empty
    MissingToken(String),
    /// The origin remote is not on the recognized hosting service
    UnsupportedHost(String),
}

impl fmt::Display for PrSkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrSkipReason::PushDisabled => write!(f, "push disabled"),
            PrSkipReason::Disabled => write!(f, "disabled by -nopr"),
            PrSkipReason::MissingToken(var) => write!(f, "{} is not set", var),
            PrSkipReason::UnsupportedHost(host) => write!(f, "remote host {} not supported", host),
        }
    }
}

/// What happened to the pull request stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PullRequestStatus {
    /// Created; the service may omit the URL
    Created { url: Option<String> },
    /// Not attempted
    Skipped { reason: PrSkipReason },
}

impl PullRequestStatus {
    /// Creates a Skipped status
    pub fn skipped(reason: PrSkipReason) -> Self {
        PullRequestStatus::Skipped { reason }
    }

    /// Returns the pull request URL if one was reported
    pub fn url(&self) -> Option<&str> {
        match self {
            PullRequestStatus::Created { url } => url.as_deref(),
            PullRequestStatus::Skipped { .. } => None,
        }
    }
}

/// Summary of a completed upgrade
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    /// Module path
    pub path: String,
    /// Version before the upgrade
    pub old_version: String,
    /// Version after the upgrade
    pub new_version: String,
    /// Branch holding the commit
    pub branch: String,
    /// Whether the branch was pushed
    pub pushed: bool,
    /// Whether `go mod vendor` ran
    pub vendored: bool,
    /// Pull request stage result
    pub pull_request: PullRequestStatus,
}

/// How a run ended without a fatal error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Dependency upgraded and committed
    Updated(UpdateReport),
    /// The requested version is already pinned; nothing was touched
    AlreadyAtVersion { path: String, version: String },
    /// `go get` resolved to the pinned version
    AlreadyCurrent { path: String, version: String },
    /// The update branch already exists on the remote; the tree was reset
    AlreadyProposed { branch: String, remote_refs: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(PrSkipReason::PushDisabled.to_string(), "push disabled");
        assert_eq!(
            PrSkipReason::MissingToken("GITHUB_TOKEN".to_string()).to_string(),
            "GITHUB_TOKEN is not set"
        );
        assert_eq!(
            PrSkipReason::UnsupportedHost("gitlab.com".to_string()).to_string(),
            "remote host gitlab.com not supported"
        );
    }

    #[test]
    fn test_pull_request_url() {
        let created = PullRequestStatus::Created {
            url: Some("https://github.com/o/r/pull/1".to_string()),
        };
        assert_eq!(created.url(), Some("https://github.com/o/r/pull/1"));
        assert_eq!(
            PullRequestStatus::skipped(PrSkipReason::Disabled).url(),
            None
        );
    }

    #[test]
    fn test_serde_outcome_tag() {
        let outcome = RunOutcome::AlreadyProposed {
            branch: "update-bar-v1.3.0".to_string(),
            remote_refs: String::new(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"type\":\"already_proposed\""));
    }
}
