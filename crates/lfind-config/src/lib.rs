//! Configuration system for lfind.
//!
//! lfind runs without any configuration. An optional TOML file (`~/.lfind.toml`, or the
//! file passed with `--config`) can tune index storage, the default MIME allow-list for
//! content search, and the per-query result cap. Command-line flags override anything
//! loaded here.

#![warn(missing_docs)]

mod discovery;
mod error;
mod parse;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_file, global_config_path};
pub use error::ConfigError;
pub use parse::{
    RawConfig, RawContentSettings, RawIndexSettings, RawSearchSettings, parse_config_file,
    parse_config_str,
};

/// Default writer heap size (50 MB).
pub const DEFAULT_HEAP_SIZE: usize = 50_000_000;

/// Smallest heap Tantivy accepts for a single indexing thread (15 MB).
pub const MIN_HEAP_SIZE: usize = 15_000_000;

/// Fully resolved configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Index storage settings.
    pub index: IndexSettings,
    /// Content-mode settings.
    pub content: ContentSettings,
    /// Query evaluation settings.
    pub search: SearchSettings,
    /// File the configuration was loaded from, if any.
    pub source: Option<PathBuf>,
}

/// Index storage settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSettings {
    /// Keep the index in RAM instead of a temporary directory.
    pub in_memory: bool,
    /// Writer heap size in bytes.
    pub heap_size: usize,
    /// Records between intermediate commits; `None` uses the per-mode default.
    pub commit_every: Option<usize>,
    /// Parent directory for the temporary index directory; `None` uses the system default.
    pub temp_dir: Option<PathBuf>,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            in_memory: false,
            heap_size: DEFAULT_HEAP_SIZE,
            commit_every: None,
            temp_dir: None,
        }
    }
}

/// Content-mode settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSettings {
    /// Default MIME allow-list, as written by the user.
    pub mime_types: Vec<String>,
}

/// Query evaluation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSettings {
    /// Maximum matches returned per query; `None` returns every match.
    pub max_results: Option<usize>,
}

impl Config {
    /// Loads configuration.
    ///
    /// Uses `explicit` when given, else `~/.lfind.toml` if it exists. Returns
    /// `Config::default()` when there is nothing to load.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match discover_config_file(explicit) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads and resolves a specific configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = parse_config_file(path)?;
        let mut config = Self::from_raw(raw)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Resolves a raw configuration, applying defaults and validating values.
    pub fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let raw_index = raw.index.unwrap_or_default();
        let defaults = IndexSettings::default();

        let heap_size = raw_index.heap_size.unwrap_or(defaults.heap_size);
        if heap_size < MIN_HEAP_SIZE {
            return Err(ConfigError::invalid(
                "index.heap_size",
                format!("{heap_size} is below the minimum of {MIN_HEAP_SIZE} bytes"),
            ));
        }

        if raw_index.commit_every == Some(0) {
            return Err(ConfigError::invalid(
                "index.commit_every",
                "must be at least 1",
            ));
        }

        let max_results = raw.search.and_then(|s| s.max_results);
        if max_results == Some(0) {
            return Err(ConfigError::invalid(
                "search.max_results",
                "must be at least 1",
            ));
        }

        Ok(Self {
            index: IndexSettings {
                in_memory: raw_index.in_memory.unwrap_or(defaults.in_memory),
                heap_size,
                commit_every: raw_index.commit_every,
                temp_dir: raw_index.temp_dir.map(PathBuf::from),
            },
            content: ContentSettings {
                mime_types: raw
                    .content
                    .and_then(|c| c.mime_types)
                    .unwrap_or_default(),
            },
            search: SearchSettings { max_results },
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn resolve(contents: &str) -> Result<Config, ConfigError> {
        Config::from_raw(parse_config_str(contents, Path::new("test.toml"))?)
    }

    #[test]
    fn defaults_when_empty() {
        let config = resolve("").unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.index.in_memory);
        assert_eq!(config.index.heap_size, DEFAULT_HEAP_SIZE);
        assert!(config.search.max_results.is_none());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = resolve("[index]\nin_memory = true\n").unwrap();
        assert!(config.index.in_memory);
        assert_eq!(config.index.heap_size, DEFAULT_HEAP_SIZE);
        assert!(config.content.mime_types.is_empty());
    }

    #[test]
    fn rejects_small_heap() {
        let err = resolve("[index]\nheap_size = 1000\n").unwrap_err();
        assert!(err.to_string().contains("index.heap_size"));
    }

    #[test]
    fn rejects_zero_commit_interval() {
        let err = resolve("[index]\ncommit_every = 0\n").unwrap_err();
        assert!(err.to_string().contains("index.commit_every"));
    }

    #[test]
    fn rejects_zero_max_results() {
        let err = resolve("[search]\nmax_results = 0\n").unwrap_err();
        assert!(err.to_string().contains("search.max_results"));
    }

    #[test]
    fn load_from_file_records_source() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        fs::write(&path, "[content]\nmime_types = [\"text\"]\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
        assert_eq!(config.content.mime_types, vec!["text".to_string()]);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(ConfigError::ReadFile { .. })
        ));
    }
}
