//! Diagnostics setup.
//!
//! Logging is configured exactly once, before any work starts. Everything goes to stderr
//! so stdout carries only results.

use std::io;

use tracing_subscriber::EnvFilter;

/// Crates whose logs follow the verbosity flag.
const OWN_CRATES: &[&str] = &["lfind", "lfind_config", "lfind_extract", "lfind_index"];

/// Filter directives for a `-v` count.
///
/// Quiet runs show errors only. `-v` shows per-file skips and progress from lfind,
/// `-vv` adds debug detail, and `-vvv` opens everything up, dependencies included.
pub fn directives(verbose: u8) -> String {
    let level = match verbose {
        0 => return "error".to_string(),
        1 => "info",
        2 => "debug",
        _ => return "trace".to_string(),
    };
    let mut directives = vec!["warn".to_string()];
    directives.extend(OWN_CRATES.iter().map(|name| format!("{name}={level}")));
    directives.join(",")
}

/// Installs the global subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(verbose)));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
    if let Err(e) = result {
        eprintln!("warning: logging already initialized: {e}");
    }
}
