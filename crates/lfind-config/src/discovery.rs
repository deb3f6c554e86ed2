//! Configuration file discovery.
//!
//! lfind reads at most one configuration file: the path given on the command line, or
//! `~/.lfind.toml` when it exists.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".lfind.toml";

/// Returns the path to the global configuration file (`~/.lfind.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Picks the configuration file to load.
///
/// An explicit path always wins, even if it does not exist (loading it then fails loudly).
/// Otherwise the global file is used if present.
pub fn discover_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    global_config_path().filter(|path| path.is_file())
}
