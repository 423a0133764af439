// Diagnostics go to stderr through tracing, so stdout only ever carries the
// confirmation line (or the JSON report).
//
// Level priority: RUST_LOG > -v flags > [logging] level > "warn".

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Pick the filter directive for a run.
///
/// `verbose` is the `-v` count (already zeroed by `--quiet`); `config_level`
/// comes from the `[logging]` section of the configuration file.
pub fn filter_directive(verbose: u8, config_level: Option<&str>) -> String {
    match verbose {
        0 => config_level
            .unwrap_or(crate::config::DEFAULT_LOG_LEVEL)
            .to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Initialise the logging subsystem. Safe to call more than once; later
/// calls are ignored.
pub fn init(verbose: u8, config_level: Option<&str>) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(filter_directive(verbose, config_level))
            .unwrap_or_else(|_| EnvFilter::new(crate::config::DEFAULT_LOG_LEVEL))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .compact()
        .try_init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialised");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_priority() {
        assert_eq!(filter_directive(0, None), "warn");
        assert_eq!(filter_directive(0, Some("error")), "error");
        assert_eq!(filter_directive(1, Some("error")), "info");
        assert_eq!(filter_directive(2, None), "debug");
        assert_eq!(filter_directive(5, None), "trace");
    }
}
