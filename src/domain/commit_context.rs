//! Data rendered into the commit message and post-update command
//!
//! The release URL is a best-effort guess built from Go module versioning
//! conventions: a strict `vX.Y.Z` tag is browsable as a tree on the hosting
//! service, anything else is assumed to be a pseudo-version whose last
//! `-` delimited segment is a commit hash.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Hosting service whose module paths get a release URL
pub const RECOGNIZED_HOST: &str = "github.com";

// Strict release tag: v1.2.3, no pre-release or build suffix
static RELEASE_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v\d+\.\d+\.\d+$").unwrap());

/// How a resolved module version should be presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRef {
    /// Strict semantic version tag
    Release {
        /// Version without the leading `v`
        human: String,
        /// The tag itself
        tag: String,
    },
    /// Anything else, treated as `<prefix>-<timestamp>-<commit>`
    Pseudo {
        /// The raw version string
        raw: String,
        /// Trailing segment, assumed to be a commit hash
        commit: String,
    },
}

impl VersionRef {
    /// Classify a version string
    pub fn parse(version: &str) -> Self {
        if RELEASE_TAG_RE.is_match(version) {
            VersionRef::Release {
                human: version[1..].to_string(),
                tag: version.to_string(),
            }
        } else {
            let commit = version.rsplit('-').next().unwrap_or(version);
            VersionRef::Pseudo {
                raw: version.to_string(),
                commit: commit.to_string(),
            }
        }
    }

    /// Version as shown to humans
    pub fn human(&self) -> &str {
        match self {
            VersionRef::Release { human, .. } => human,
            VersionRef::Pseudo { raw, .. } => raw,
        }
    }

    /// Segment used after `/tree/` in the release URL
    pub fn tree(&self) -> &str {
        match self {
            VersionRef::Release { tag, .. } => tag,
            VersionRef::Pseudo { commit, .. } => commit,
        }
    }
}

/// Returns the last `/` delimited segment of a module path
pub fn project_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Returns the deterministic update branch name
pub fn branch_name(project: &str, version: &str) -> String {
    format!("update-{}-{}", project, version)
}

/// Template context shared by the commit message and post-update command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitContext {
    /// Last path segment of the module
    pub project: String,
    /// Owning organization when hosted on the recognized host, else empty
    pub owner: String,
    /// Human readable version
    pub version: String,
    /// Version exactly as written in go.mod
    pub raw_version: String,
    /// Argument passed to `go get`
    pub target: String,
    /// Module path
    pub path: String,
    /// Release URL, empty when unknown
    pub url: String,
    /// Whether `go mod vendor` was run
    pub vendor: bool,
}

impl CommitContext {
    /// Build the context for an upgrade that resolved to `new_version`
    pub fn new(path: &str, new_version: &str, target: &str, vendor: bool) -> Self {
        let version = VersionRef::parse(new_version);
        let mut segments = path.split('/');
        let hosted = segments.next() == Some(RECOGNIZED_HOST);

        let (owner, url) = if hosted {
            let owner = segments.next().unwrap_or_default().to_string();
            let url = format!("https://{}/tree/{}", path, version.tree());
            (owner, url)
        } else {
            (String::new(), String::new())
        };

        Self {
            project: project_name(path).to_string(),
            owner,
            version: version.human().to_string(),
            raw_version: new_version.to_string(),
            target: target.to_string(),
            path: path.to_string(),
            url,
            vendor,
        }
    }

    /// Branch the upgrade is committed on
    pub fn branch_name(&self) -> String {
        branch_name(&self.project, &self.raw_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name() {
        assert_eq!(project_name("github.com/foo/bar"), "bar");
        assert_eq!(project_name("gopkg.in/yaml.v3"), "yaml.v3");
        assert_eq!(project_name("single"), "single");
    }

    #[test]
    fn test_branch_name() {
        assert_eq!(branch_name("bar", "v1.3.0"), "update-bar-v1.3.0");
    }

    #[test]
    fn test_version_ref_release() {
        let v = VersionRef::parse("v1.4.2");
        assert_eq!(v.human(), "1.4.2");
        assert_eq!(v.tree(), "v1.4.2");
    }

    #[test]
    fn test_version_ref_pseudo() {
        let v = VersionRef::parse("v0.0.0-20230101000000-abcdef123456");
        assert_eq!(v.human(), "v0.0.0-20230101000000-abcdef123456");
        assert_eq!(v.tree(), "abcdef123456");
    }

    #[test]
    fn test_version_ref_prerelease_is_not_release() {
        let v = VersionRef::parse("v1.2.3-rc.1");
        assert!(matches!(v, VersionRef::Pseudo { .. }));
        assert_eq!(v.tree(), "rc.1");
    }

    #[test]
    fn test_version_ref_incompatible_is_not_release() {
        let v = VersionRef::parse("v2.0.0+incompatible");
        assert!(matches!(v, VersionRef::Pseudo { .. }));
    }

    #[test]
    fn test_context_for_github_release() {
        let ctx = CommitContext::new(
            "github.com/foo/bar",
            "v1.3.0",
            "github.com/foo/bar@v1.3.0",
            false,
        );
        assert_eq!(ctx.project, "bar");
        assert_eq!(ctx.owner, "foo");
        assert_eq!(ctx.version, "1.3.0");
        assert_eq!(ctx.raw_version, "v1.3.0");
        assert_eq!(ctx.url, "https://github.com/foo/bar/tree/v1.3.0");
        assert_eq!(ctx.branch_name(), "update-bar-v1.3.0");
    }

    #[test]
    fn test_context_for_github_pseudo_version() {
        let ctx = CommitContext::new(
            "github.com/foo/bar",
            "v0.0.0-20230101000000-abcdef123456",
            "github.com/foo/bar",
            true,
        );
        assert_eq!(ctx.url, "https://github.com/foo/bar/tree/abcdef123456");
        assert!(ctx.vendor);
        assert_eq!(
            ctx.branch_name(),
            "update-bar-v0.0.0-20230101000000-abcdef123456"
        );
    }

    #[test]
    fn test_context_for_other_host_has_no_url() {
        let ctx = CommitContext::new("golang.org/x/net", "v0.20.0", "golang.org/x/net", false);
        assert_eq!(ctx.project, "net");
        assert!(ctx.owner.is_empty());
        assert!(ctx.url.is_empty());
        assert_eq!(ctx.version, "0.20.0");
    }

    #[test]
    fn test_host_must_be_first_segment() {
        let ctx = CommitContext::new("example.com/github.com/x", "v1.0.0", "t", false);
        assert!(ctx.url.is_empty());
    }
}
