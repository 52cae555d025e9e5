//! Text output formatter for the end-of-run summary

use crate::domain::{PullRequestStatus, RunOutcome, UpdateReport};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn highlight(&self, text: &str) -> String {
        if self.color {
            text.bright_white().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn format_update(&self, report: &UpdateReport, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer)?;
        writeln!(
            writer,
            "path {} successfully updated to version {}.",
            self.highlight(&report.path),
            self.highlight(&report.new_version)
        )?;
        writeln!(
            writer,
            "  {} {} {}",
            self.dim(&report.old_version),
            if self.color { "→" } else { "->" },
            report.new_version
        )?;

        let pushed = if report.pushed { "pushed" } else { "not pushed" };
        writeln!(writer, "  branch {} ({})", report.branch, pushed)?;
        if report.vendored {
            writeln!(writer, "  vendor directory synced")?;
        }

        match &report.pull_request {
            PullRequestStatus::Created { url: Some(url) } => {
                writeln!(writer, "pull request has been created at:")?;
                writeln!(writer, "    {}", self.highlight(url))?;
            }
            PullRequestStatus::Created { url: None } => {
                writeln!(writer, "pull request has been created")?;
            }
            PullRequestStatus::Skipped { reason } => {
                writeln!(writer, "  {}", self.dim(&format!("(no pull request: {})", reason)))?;
            }
        }
        Ok(())
    }

    /// Format and write the outcome of a run
    pub fn format(&self, outcome: &RunOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        match outcome {
            RunOutcome::Updated(report) => self.format_update(report, writer),
            RunOutcome::AlreadyAtVersion { path, version } => writeln!(
                writer,
                "package {} is already at version {}, nothing to do.",
                path, version
            ),
            RunOutcome::AlreadyCurrent { path, version } => writeln!(
                writer,
                "package {} version {} is already current, nothing to do.",
                path, version
            ),
            RunOutcome::AlreadyProposed {
                branch,
                remote_refs,
            } => {
                writeln!(
                    writer,
                    "remote branch {} for version already exists, exiting. \
                     This could possibly be due to a pending update.",
                    branch
                )?;
                if !remote_refs.is_empty() {
                    writeln!(writer, "details:")?;
                    writeln!(writer, "{}", remote_refs)?;
                }
                Ok(())
            }
        }
    }
}
