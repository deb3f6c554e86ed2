//! Configuration file parsing.
//!
//! Parses a `.lfind.toml` file into a `RawConfig` whose fields are all optional, so a
//! partial file only overrides the settings it mentions.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Index storage settings.
    pub index: Option<RawIndexSettings>,
    /// Content-mode settings.
    pub content: Option<RawContentSettings>,
    /// Query evaluation settings.
    pub search: Option<RawSearchSettings>,
}

/// Raw `[index]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawIndexSettings {
    /// Keep the index in RAM instead of a temporary directory.
    pub in_memory: Option<bool>,
    /// Writer heap size in bytes.
    pub heap_size: Option<usize>,
    /// Records between intermediate commits.
    pub commit_every: Option<usize>,
    /// Parent directory for the temporary index directory.
    pub temp_dir: Option<String>,
}

/// Raw `[content]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawContentSettings {
    /// Default MIME allow-list (`pdf`, `doc`, `text`).
    pub mime_types: Option<Vec<String>>,
}

/// Raw `[search]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSearchSettings {
    /// Maximum matches returned per query.
    pub max_results: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(contents: &str) -> Result<RawConfig, ConfigError> {
        parse_config_str(contents, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_parses_to_defaults() {
        let raw = parse("").unwrap();
        assert!(raw.index.is_none());
        assert!(raw.content.is_none());
        assert!(raw.search.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let raw = parse(
            r#"
[index]
in_memory = true
heap_size = 20000000
commit_every = 10
temp_dir = "/var/tmp"

[content]
mime_types = ["pdf", "text"]

[search]
max_results = 25
"#,
        )
        .unwrap();

        let index = raw.index.unwrap();
        assert_eq!(index.in_memory, Some(true));
        assert_eq!(index.heap_size, Some(20_000_000));
        assert_eq!(index.commit_every, Some(10));
        assert_eq!(index.temp_dir.as_deref(), Some("/var/tmp"));
        assert_eq!(
            raw.content.unwrap().mime_types,
            Some(vec!["pdf".to_string(), "text".to_string()])
        );
        assert_eq!(raw.search.unwrap().max_results, Some(25));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = parse("[index]\nheap = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn reports_path_on_read_failure() {
        let err = parse_config_file(Path::new("/nonexistent/.lfind.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/.lfind.toml"));
    }
}
