//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: bad command-line input, raised before any side effect
//! - CommandError: an external `go`/`git`/post-update process failed
//! - ManifestError: go.mod introspection problems
//! - TemplateError: commit template compilation or rendering
//! - GitError: branch/commit/push failures, with operator guidance
//! - HostingError: remote URL parsing and pull request creation

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The working tree has uncommitted changes
    #[error("uncommitted changes in repository, please commit or stash before continuing")]
    DirtyWorkingTree,

    /// Manifest related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Template related errors
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Version control related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// The post-update command failed on the update branch
    #[error(
        "error running post-update command: {source}\n\n\
         WARNING: branch {branch} has uncommitted changes; manual cleanup is required before trying again"
    )]
    PostCommand {
        branch: String,
        #[source]
        source: CommandError,
    },

    /// A failure after `go get` rewrote go.mod/go.sum on the original branch
    #[error(
        "{source}\n\n\
         WARNING: go.mod/go.sum were modified by `go get`; reset the working tree before trying again"
    )]
    ModifiedTree {
        #[source]
        source: Box<AppError>,
    },

    /// Remote/hosting related errors raised before any mutation
    #[error(transparent)]
    Hosting(#[from] HostingError),

    /// Pull request creation failed after the branch was pushed
    #[error("{source}\n\nWARNING: {}", pull_request_advice(.source, .branch))]
    PullRequest {
        branch: String,
        #[source]
        source: HostingError,
    },
}

impl AppError {
    /// Wraps a failure that happened while go.mod/go.sum held uncommitted upgrades
    pub fn modified_tree(source: AppError) -> Self {
        AppError::ModifiedTree {
            source: Box::new(source),
        }
    }
}

/// Follow-up advice once the branch is pushed but the pull request call failed
fn pull_request_advice(source: &HostingError, branch: &str) -> String {
    if source.status_unknown() {
        format!(
            "update succeeded and branch {} was pushed; do not open another pull request before checking",
            branch
        )
    } else {
        format!(
            "update succeeded and branch {} was pushed; open the pull request manually",
            branch
        )
    }
}

/// Errors related to command-line configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Dependency path is empty
    #[error("path is empty")]
    EmptyPath,

    /// Post-update command starts with an empty program name
    #[error("post-update command has an empty program name")]
    EmptyCommand,
}

/// Errors raised while running an external process
#[derive(Error, Debug)]
pub enum CommandError {
    /// The process could not be started
    #[error("failed to execute `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully
    #[error("`{command}` failed with {status}")]
    Failed { command: String, status: String },
}

/// Errors related to the go.mod manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The dependency is not required by go.mod
    #[error("package {path:?} not found in go.mod, cannot get version")]
    DependencyNotFound { path: String },

    /// `go mod edit -json` produced something we cannot decode
    #[error("failed to parse `go mod edit -json` output: {message}")]
    InvalidJson { message: String },

    /// A `go` subcommand failed
    #[error(transparent)]
    Tool(#[from] CommandError),

    /// The vendor manifest could not be inspected
    #[error("failed to inspect {path}: {source}")]
    VendorProbe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to the built-in commit template and command templating
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The built-in template does not compile
    #[error("invalid commit template: {0}")]
    Invalid(#[from] Box<handlebars::TemplateError>),

    /// The commit message could not be rendered
    #[error("error rendering commit message: {0}")]
    Render(#[source] Box<handlebars::RenderError>),

    /// A post-update command token could not be rendered
    #[error("error building post-update command from {token:?}: {source}")]
    Command {
        token: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// Errors raised by git, carrying the state the repository was left in
#[derive(Error, Debug)]
pub enum GitError {
    /// A read-only git query failed
    #[error(transparent)]
    Query(#[from] CommandError),

    /// Checking the remote for an existing update branch failed
    #[error("error checking for remote branch {branch}: {source}")]
    RemoteCheck {
        branch: String,
        #[source]
        source: CommandError,
    },

    /// Hard reset after a remote collision failed
    #[error("could not reset repository back to original state: {0}")]
    Reset(#[source] CommandError),

    /// Creating the update branch failed
    #[error(
        "could not create branch {branch}: {source}\n\n\
         WARNING: the working tree still holds the upgraded files"
    )]
    CreateBranch {
        branch: String,
        #[source]
        source: CommandError,
    },

    /// Staging failed on the update branch
    #[error(
        "could not stage changes: {0}\n\n\
         WARNING: repository is in an unclean state; please correct before trying again"
    )]
    Stage(#[source] CommandError),

    /// Commit failed on the update branch
    #[error(
        "{0}\n\n\
         WARNING: repository is in an unclean state; please correct before trying again"
    )]
    Commit(#[source] CommandError),

    /// Push failed after a successful commit
    #[error("{0}\n\nWARNING: commit succeeded but push failed; push manually to correct")]
    Push(#[source] CommandError),

    /// Returning to the original branch failed after the update
    #[error(
        "{source}\n\n\
         WARNING: update succeeded, but cannot checkout old branch {branch}"
    )]
    Restore {
        branch: String,
        #[source]
        source: CommandError,
    },
}

/// Errors related to the code hosting service
#[derive(Error, Debug)]
pub enum HostingError {
    /// The origin remote is neither a URL nor a `user@host:path` SSH address
    #[error("unsupported remote URL format {url:?}: expected https://HOST/OWNER/REPO or USER@HOST:OWNER/REPO")]
    UnsupportedRemote { url: String },

    /// The remote path is not OWNER/REPO
    #[error("expected repo remote URI to follow OWNER/REPO format, got {path:?}")]
    InvalidRepoPath { path: String },

    /// HTTP client construction failed
    #[error("failed to create HTTP client: {message}")]
    Client { message: String },

    /// The request could not be sent
    #[error("error creating pull request: {message}")]
    Request { message: String },

    /// The response body could not be read
    #[error(
        "error reading response body after creating pull request: {message}\n\n\
         WARNING: pull request status unknown, check your repository"
    )]
    ReadBody { message: String },

    /// The service answered with something other than 201 Created
    #[error("error creating pull request ({status}): {body}")]
    Rejected { status: String, body: String },

    /// A JSON response did not match the expected pull request shape
    #[error(
        "unexpected pull request response: {message}\n\n\
         WARNING: pull request status unknown, check your repository"
    )]
    UnexpectedShape { message: String },
}

impl CommandError {
    /// Creates a new Spawn error
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        CommandError::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Creates a new Failed error from an exit status
    pub fn failed(command: impl Into<String>, status: std::process::ExitStatus) -> Self {
        CommandError::Failed {
            command: command.into(),
            status: status.to_string(),
        }
    }
}

impl ManifestError {
    /// Creates a new DependencyNotFound error
    pub fn not_found(path: impl Into<String>) -> Self {
        ManifestError::DependencyNotFound { path: path.into() }
    }

    /// Creates a new InvalidJson error
    pub fn invalid_json(message: impl Into<String>) -> Self {
        ManifestError::InvalidJson {
            message: message.into(),
        }
    }
}

impl HostingError {
    /// Creates a new UnsupportedRemote error
    pub fn unsupported_remote(url: impl Into<String>) -> Self {
        HostingError::UnsupportedRemote { url: url.into() }
    }

    /// Creates a new InvalidRepoPath error
    pub fn invalid_repo_path(path: impl Into<String>) -> Self {
        HostingError::InvalidRepoPath { path: path.into() }
    }

    /// Whether the pull request may exist despite the error
    pub fn status_unknown(&self) -> bool {
        matches!(
            self,
            HostingError::ReadBody { .. } | HostingError::UnexpectedShape { .. }
        )
    }
}
