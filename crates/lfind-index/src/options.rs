//! Construction options shared by every searcher.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use lfind_config::Config;
use lfind_extract::MimeKind;

use crate::IndexOptions;

/// Everything a searcher needs to know before it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Root directory for filesystem crawls.
    pub root: PathBuf,
    /// Kinds admitted by the content searcher. All extractable kinds when `None`.
    pub mime_types: Option<BTreeSet<MimeKind>>,
    /// Storage settings.
    pub index: IndexOptions,
    /// Records between intermediate commits. Per-mode default when `None`.
    pub commit_every: Option<usize>,
    /// Cap on matches per query. Unlimited when `None`.
    pub max_results: Option<usize>,
}

impl SearchOptions {
    /// Default options rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Options seeded from a loaded configuration.
    ///
    /// The MIME allow-list is left unset; callers resolve it from the raw names in
    /// `config.content.mime_types` so bad names can be reported at the surface.
    pub fn from_config(config: &Config) -> Self {
        Self {
            index: IndexOptions {
                in_memory: config.index.in_memory,
                heap_size: config.index.heap_size,
                temp_dir: config.index.temp_dir.clone(),
            },
            commit_every: config.index.commit_every,
            max_results: config.search.max_results,
            ..Self::default()
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            mime_types: None,
            index: IndexOptions::default(),
            commit_every: None,
            max_results: None,
        }
    }
}
