//! Manifest access
//!
//! depbump never edits go.mod itself; the `go` command does. This module
//! wraps the handful of `go` invocations a run needs.

mod go_mod;

pub use go_mod::{parse_requirements, GoModTool, VENDOR_MANIFEST};
