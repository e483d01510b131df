//! Diagnostic logging setup.
//!
//! Events from detzip-core go to stderr so they never mix with the report
//! on stdout. `RUST_LOG` takes precedence over the verbosity flags.

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    // An already installed subscriber is kept.
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        && verbose
    {
        eprintln!("detzip: keeping existing log subscriber: {err}");
    }
}

const fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false, false), "warn");
        assert_eq!(default_directive(true, false), "debug");
        assert_eq!(default_directive(false, true), "error");
    }

    #[test]
    fn test_init_twice_keeps_first_subscriber() {
        init(false, false);
        init(true, false);
        tracing::debug!("still routed through the first subscriber");
    }
}
