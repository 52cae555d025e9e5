//! depbump - Go module dependency bumper library
//!
//! This library bumps one dependency in go.mod and turns the result into a
//! reviewable change:
//! - `go get` / `go mod tidy` / `go mod vendor` through the `go` command
//! - a templated commit on a dedicated `update-<project>-<version>` branch
//! - an optional push and GitHub pull request

pub mod cli;
pub mod domain;
pub mod error;
pub mod exec;
pub mod hosting;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod telemetry;
pub mod template;
pub mod vcs;
