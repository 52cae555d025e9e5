//! Operator-facing output
//!
//! This module provides:
//! - `Reporter` for progress narration while the pipeline runs
//! - `TextFormatter` for the final summary of a run
//!
//! Narration and summaries go to stdout; warnings go to stderr.

mod text;

pub use text::TextFormatter;

use colored::Colorize;

/// Progress narration for the pipeline
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    /// Whether anything is printed at all
    enabled: bool,
    /// Whether to use colors
    color: bool,
}

impl Reporter {
    /// Create a reporter printing to the terminal
    pub fn new(color: bool) -> Self {
        Self {
            enabled: true,
            color,
        }
    }

    /// Create a reporter that prints nothing
    pub fn silent() -> Self {
        Self {
            enabled: false,
            color: false,
        }
    }

    /// Whether narration is printed
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Announce a pipeline step
    pub fn step(&self, message: &str) {
        if !self.enabled {
            return;
        }
        if self.color {
            println!("{} {}", "==>".cyan().bold(), message.bold());
        } else {
            println!("==> {}", message);
        }
    }

    /// Print an informational line
    pub fn info(&self, message: &str) {
        if self.enabled {
            println!("{}", message);
        }
    }

    /// Print a non-fatal warning
    pub fn warn(&self, message: &str) {
        if !self.enabled {
            return;
        }
        if self.color {
            eprintln!("{} {}", "WARNING:".yellow().bold(), message);
        } else {
            eprintln!("WARNING: {}", message);
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_silent() {
        let reporter = Reporter::silent();
        assert!(!reporter.is_enabled());
        reporter.step("test");
        reporter.info("test");
        reporter.warn("test");
    }

    #[test]
    fn test_reporter_default_enabled() {
        assert!(Reporter::default().is_enabled());
    }
}
