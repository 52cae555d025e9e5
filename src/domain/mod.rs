//! Core domain models for depbump
//!
//! This module contains the types that flow through a run:
//! - Run configuration parsed from the command line
//! - Dependency records read from go.mod
//! - The template context derived from an upgrade
//! - Terminal outcomes of the pipeline

mod commit_context;
mod dependency;
mod outcome;
mod run_config;

pub use commit_context::{
    branch_name, project_name, CommitContext, VersionRef, RECOGNIZED_HOST,
};
pub use dependency::DependencyRecord;
pub use outcome::{PrSkipReason, PullRequestStatus, RunOutcome, UpdateReport};
pub use run_config::{RunConfig, DEFAULT_BASE_BRANCH, DEFAULT_TOKEN_VAR};
