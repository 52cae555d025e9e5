//! Git access through the `git` command
//!
//! Read-only queries map failures to `GitError::Query`; mutating calls map
//! them to the variant describing the state the repository is left in.

use crate::error::{CommandError, GitError};
use crate::exec::CommandRunner;

/// Remote every push, ls-remote and pull request goes through
pub const REMOTE: &str = "origin";

/// Wrapper around the `git` command
pub struct Git<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Git<'a> {
    /// Create a wrapper that runs `git` through `runner`
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    fn query(&self, args: &[&str]) -> Result<String, CommandError> {
        self.runner.output("git", args)
    }

    /// Whether `git status --porcelain` reports anything
    pub fn is_dirty(&self) -> Result<bool, GitError> {
        let status = self.query(&["status", "--porcelain"])?;
        Ok(!status.trim().is_empty())
    }

    /// Name of the checked out branch
    pub fn current_branch(&self) -> Result<String, GitError> {
        let out = self.query(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(out.trim().to_string())
    }

    /// URL of the origin remote
    pub fn remote_url(&self) -> Result<String, GitError> {
        let out = self.query(&["remote", "get-url", REMOTE])?;
        Ok(out.trim().to_string())
    }

    /// Refs matching `branch` on origin, `None` if there are none
    pub fn remote_branch(&self, branch: &str) -> Result<Option<String>, GitError> {
        let out = self
            .query(&["ls-remote", "--heads", REMOTE, branch])
            .map_err(|source| GitError::RemoteCheck {
                branch: branch.to_string(),
                source,
            })?;
        let refs = out.trim();
        Ok((!refs.is_empty()).then(|| refs.to_string()))
    }

    /// Discard every tracked change
    pub fn reset_hard(&self) -> Result<(), GitError> {
        self.runner
            .run("git", &["reset", "--hard", "HEAD"])
            .map_err(GitError::Reset)
    }

    /// Create and switch to `branch`
    pub fn create_branch(&self, branch: &str) -> Result<(), GitError> {
        self.runner
            .run("git", &["checkout", "-b", branch])
            .map_err(|source| GitError::CreateBranch {
                branch: branch.to_string(),
                source,
            })
    }

    /// Stage all changes, including new and deleted files
    pub fn add_all(&self) -> Result<(), GitError> {
        self.runner
            .run("git", &["add", "--all"])
            .map_err(GitError::Stage)
    }

    /// Commit staged changes with `message` read from stdin
    pub fn commit(&self, message: &str) -> Result<(), GitError> {
        self.runner
            .run_with_input("git", &["commit", "-F", "-"], message)
            .map_err(GitError::Commit)
    }

    /// Push `branch` to origin
    pub fn push(&self, branch: &str) -> Result<(), GitError> {
        self.runner
            .run("git", &["push", REMOTE, branch])
            .map_err(GitError::Push)
    }

    /// Switch back to `branch` after the update
    pub fn restore(&self, branch: &str) -> Result<(), GitError> {
        self.runner
            .run("git", &["checkout", branch])
            .map_err(|source| GitError::Restore {
                branch: branch.to_string(),
                source,
            })
    }
}
