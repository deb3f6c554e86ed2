//! Search over file and directory names.

use std::{
    fmt,
    fs::Metadata,
    path::{Path, PathBuf},
};

use tantivy::TantivyDocument;
use tracing::info;

use super::{FILE_COMMIT_EVERY, SearchCore, Searcher, text_field};
use crate::{IndexError, IndexHandle, SearchMode, SearchOptions, crawl, schema::MetadataSchema};

/// Kind of filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file.
    File,
    /// Directory.
    Dir,
}

impl EntryType {
    /// Classifies attributes. Anything that is neither a file nor a directory is `None`.
    pub fn of(metadata: &Metadata) -> Option<Self> {
        if metadata.is_dir() {
            Some(Self::Dir)
        } else if metadata.is_file() {
            Some(Self::File)
        } else {
            None
        }
    }

    /// Label stored in the index.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "FILE",
            Self::Dir => "DIR",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width specifiers apply.
        f.pad(self.as_str())
    }
}

/// Matches queries against entry names under a root directory.
pub struct MetadataSearcher {
    /// Field handles.
    schema: MetadataSchema,
    /// Shared index state.
    core: SearchCore,
    /// Absolute crawl root.
    root: PathBuf,
}

impl MetadataSearcher {
    /// Crawls `options.root` and indexes one record per file or directory.
    pub fn build(options: &SearchOptions) -> Result<Self, IndexError> {
        let root = crawl::validate_root(&options.root)?;
        let schema = MetadataSchema::new();
        let mut handle = IndexHandle::create(schema.schema(), &options.index)?;

        let mut writer = handle.writer(options.commit_every.unwrap_or(FILE_COMMIT_EVERY))?;
        for entry in crawl::entries(&root) {
            let Some(entry_type) = EntryType::of(&entry.metadata) else {
                continue;
            };
            let mut doc = TantivyDocument::new();
            doc.add_text(schema.file_name, &entry.file_name);
            doc.add_text(schema.abs_path, entry.path.display());
            doc.add_text(schema.entry_type, entry_type.as_str());
            writer.add(doc)?;
        }
        let records = writer.commit_and_close()?;
        handle.open_reader()?;
        info!(root = %root.display(), records, "metadata index ready");

        Ok(Self {
            core: SearchCore::new(handle, schema.file_name, options.max_results),
            schema,
            root,
        })
    }

    /// The absolute crawl root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Searcher for MetadataSearcher {
    fn mode(&self) -> SearchMode {
        SearchMode::Metadata
    }

    fn core(&self) -> &SearchCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SearchCore {
        &mut self.core
    }

    fn format_match(&self, doc: &TantivyDocument) -> String {
        format!(
            "{:<5} | {:<30} | \"{}\"",
            text_field(doc, self.schema.entry_type),
            text_field(doc, self.schema.file_name),
            text_field(doc, self.schema.abs_path),
        )
    }
}
