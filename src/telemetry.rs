//! Diagnostic logging setup
//!
//! Call [`init_tracing`] once at program start. `RUST_LOG` takes precedence;
//! otherwise `-verbose` selects debug output for this crate and the default
//! is warnings only. Logs go to stderr so they never mix with narration.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "depbump=debug"
    } else {
        "warn"
    }
}

/// Initialise the global tracing subscriber
///
/// Only the first call takes effect.
pub fn init_tracing(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(true), "depbump=debug");
        assert_eq!(default_filter(false), "warn");
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing(false);
        init_tracing(true);
    }
}
