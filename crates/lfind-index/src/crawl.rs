//! Filesystem crawl shared by the metadata and content searchers.
//!
//! Walks the root in file-name order without following symbolic links. The root itself
//! is the first entry. Entries whose attributes cannot be read are logged and skipped.

use std::{
    fs::{self, Metadata},
    io::ErrorKind,
    path::{self, Path, PathBuf},
};

use tracing::{trace, warn};
use walkdir::WalkDir;

use crate::IndexError;

/// Checks that `root` is an existing directory and returns it as an absolute path.
pub fn validate_root(root: &Path) -> Result<PathBuf, IndexError> {
    let absolute = path::absolute(root)?;
    match fs::metadata(&absolute) {
        Ok(metadata) if metadata.is_dir() => Ok(absolute),
        Ok(_) => Err(IndexError::RootNotDirectory {
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(IndexError::RootNotFound {
            path: root.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// One filesystem entry encountered by the crawl.
#[derive(Debug)]
pub struct CrawlEntry {
    /// Absolute path.
    pub path: PathBuf,
    /// Final path component, or the whole path for `/`.
    pub file_name: String,
    /// Attributes, following a symbolic link to its target.
    pub metadata: Metadata,
}

/// Walks `root`, yielding every entry whose attributes are readable.
pub fn entries(root: &Path) -> impl Iterator<Item = CrawlEntry> + '_ {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    return None;
                }
            };
            let path = entry.path();
            match fs::metadata(path) {
                Ok(metadata) => {
                    trace!(path = %path.display(), "visited");
                    Some(CrawlEntry {
                        file_name: display_name(path),
                        path: path.to_path_buf(),
                        metadata,
                    })
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping entry with unreadable attributes");
                    None
                }
            }
        })
}

/// Name shown for an entry. Never empty.
fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}
