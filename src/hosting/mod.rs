//! Code hosting integration for opening pull requests
//!
//! This module provides:
//! - HTTP client shared foundation
//! - Origin remote URL parsing
//! - GitHub pull request adapter

mod client;
mod github;
mod remote;

pub use client::{HttpClient, RawResponse};
pub use github::{interpret_response, GitHubApi, PullRequestCreated};
pub use remote::{RemoteUrl, RepoSlug};

use crate::error::HostingError;
use async_trait::async_trait;
use serde::Serialize;

/// Payload of a pull request creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    /// Title, the first paragraph of the commit message
    pub title: String,
    /// Body, the rest of the commit message
    pub body: String,
    /// Branch holding the change
    pub head: String,
    /// Branch to merge into
    pub base: String,
}

/// Trait for hosting services that can open pull requests
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// Host name this adapter serves, compared against the origin remote
    fn host(&self) -> &'static str;

    /// Open a pull request on `repo`
    async fn create_pull_request(
        &self,
        repo: &RepoSlug,
        token: &str,
        request: &NewPullRequest,
    ) -> Result<PullRequestCreated, HostingError>;
}
