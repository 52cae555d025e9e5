//! Parsing of the origin remote URL
//!
//! Two forms are understood:
//! - anything `url` can parse, e.g. `https://github.com/owner/repo.git`
//!   or `ssh://git@github.com/owner/repo.git`
//! - scp-like SSH addresses `user@host:owner/repo.git`, with exactly one `@`
//!   followed by exactly one `:`

use crate::error::HostingError;
use url::Url;

/// Host and path of a git remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    /// Host name, e.g. `github.com`
    pub host: String,
    /// Repository path without leading slash
    pub path: String,
}

/// Owner and repository name on the hosting service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    /// User or organization
    pub owner: String,
    /// Repository name without `.git`
    pub repo: String,
}

impl RemoteUrl {
    /// Parse a remote URL as printed by `git remote get-url`
    pub fn parse(raw: &str) -> Result<Self, HostingError> {
        let raw = raw.trim();
        match Url::parse(raw) {
            Ok(url) => {
                let host = url
                    .host_str()
                    .filter(|host| !host.is_empty())
                    .ok_or_else(|| HostingError::unsupported_remote(raw))?;
                Ok(Self {
                    host: host.to_string(),
                    path: url.path().trim_start_matches('/').to_string(),
                })
            }
            Err(_) => Self::parse_scp_like(raw),
        }
    }

    fn parse_scp_like(raw: &str) -> Result<Self, HostingError> {
        if raw.matches('@').count() != 1 || raw.matches(':').count() != 1 {
            return Err(HostingError::unsupported_remote(raw));
        }

        let (user_host, path) = raw
            .split_once(':')
            .ok_or_else(|| HostingError::unsupported_remote(raw))?;
        let (user, host) = user_host
            .split_once('@')
            .ok_or_else(|| HostingError::unsupported_remote(raw))?;

        if user.is_empty() || host.is_empty() || path.is_empty() {
            return Err(HostingError::unsupported_remote(raw));
        }

        Ok(Self {
            host: host.to_string(),
            path: path.to_string(),
        })
    }

    /// Split the path into owner and repository
    pub fn slug(&self) -> Result<RepoSlug, HostingError> {
        let trimmed = self.path.trim_end_matches('/');
        let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);

        match trimmed.split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Ok(RepoSlug {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(HostingError::invalid_repo_path(&self.path)),
        }
    }
}
