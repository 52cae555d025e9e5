//! External process execution
//!
//! This module provides:
//! - The `CommandRunner` seam every `go`/`git`/post-update call goes through
//! - `SystemRunner`, which runs real processes in a working directory
//!
//! Stderr of every child is passed through to the operator; stdout is either
//! passed through or captured depending on the call.

use crate::error::CommandError;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Trait for running external commands
pub trait CommandRunner {
    /// Run a command with stdout and stderr passed through
    fn run(&self, program: &str, args: &[&str]) -> Result<(), CommandError>;

    /// Run a command and capture its stdout
    fn output(&self, program: &str, args: &[&str]) -> Result<String, CommandError>;

    /// Run a command feeding `input` on stdin
    fn run_with_input(&self, program: &str, args: &[&str], input: &str)
        -> Result<(), CommandError>;
}

/// Render a command line for messages and logs
pub fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Runner that executes real processes
#[derive(Debug, Clone)]
pub struct SystemRunner {
    working_dir: PathBuf,
}

impl SystemRunner {
    /// Create a runner rooted at `working_dir`
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    fn command(&self, program: &str, args: &[&str]) -> Command {
        tracing::debug!(
            command = %command_line(program, args),
            dir = %self.working_dir.display(),
            "exec"
        );
        let mut command = Command::new(program);
        command.args(args).current_dir(&self.working_dir);
        command
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<(), CommandError> {
        let line = command_line(program, args);
        let status = self
            .command(program, args)
            .status()
            .map_err(|e| CommandError::spawn(&line, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::failed(line, status))
        }
    }

    fn output(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let line = command_line(program, args);
        let output = self
            .command(program, args)
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| CommandError::spawn(&line, e))?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(CommandError::failed(line, output.status))
        }
    }

    fn run_with_input(
        &self,
        program: &str,
        args: &[&str],
        input: &str,
    ) -> Result<(), CommandError> {
        let line = command_line(program, args);
        let mut child = self
            .command(program, args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| CommandError::spawn(&line, e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .map_err(|e| CommandError::spawn(&line, e))?;
        }

        let status = child.wait().map_err(|e| CommandError::spawn(&line, e))?;
        if status.success() {
            Ok(())
        } else {
            Err(CommandError::failed(line, status))
        }
    }
}
