//! Logging setup for triagectl.
//!
//! Logs go to stderr so stdout stays machine-readable. Filter precedence:
//! RUST_LOG, then --verbose, then the config file's [log].level.
//!
//! RUST_LOG and --verbose are known before the config file is read, so when
//! either is set the subscriber is installed early and config loading is
//! logged too.

use tracing_subscriber::EnvFilter;

const FALLBACK_LEVEL: &str = "warn";

/// Directive from sources that do not depend on the config file
pub fn override_directive(rust_log: Option<String>, verbose: bool) -> Option<String> {
    if let Some(directive) = rust_log.filter(|d| !d.trim().is_empty()) {
        return Some(directive);
    }
    verbose.then(|| "debug".to_string())
}

/// Pick the filter directive from the available sources
pub fn filter_directive(rust_log: Option<String>, verbose: bool, config_level: &str) -> String {
    if let Some(directive) = override_directive(rust_log, verbose) {
        return directive;
    }
    if config_level.trim().is_empty() {
        return FALLBACK_LEVEL.to_string();
    }
    config_level.to_string()
}

fn install(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Install the subscriber before config loading when RUST_LOG or -v
/// already decide the filter. Returns true if installed.
pub fn init_early(verbose: bool) -> bool {
    match override_directive(std::env::var("RUST_LOG").ok(), verbose) {
        Some(directive) => {
            install(&directive);
            true
        }
        None => false,
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool, config_level: &str) {
    install(&filter_directive(
        std::env::var("RUST_LOG").ok(),
        verbose,
        config_level,
    ));
}
