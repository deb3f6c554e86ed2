//! Search over extracted file contents.

use std::{collections::BTreeSet, path::Path};

use lfind_extract::{MimeKind, classify_file, extract_text};
use tantivy::TantivyDocument;
use tracing::{debug, info, warn};

use super::{FILE_COMMIT_EVERY, SearchCore, Searcher, text_field};
use crate::{IndexError, IndexHandle, SearchMode, SearchOptions, crawl, schema::ContentSchema};

/// Matches queries against the text of regular files under a root directory.
pub struct ContentSearcher {
    /// Field handles.
    schema: ContentSchema,
    /// Shared index state.
    core: SearchCore,
}

impl ContentSearcher {
    /// Crawls `options.root`, extracting and indexing every supported regular file.
    ///
    /// Files of kind `OTHER`, files outside the allow-list, and files that fail
    /// detection or extraction are skipped.
    pub fn build(options: &SearchOptions) -> Result<Self, IndexError> {
        let root = crawl::validate_root(&options.root)?;
        let schema = ContentSchema::new();
        let mut handle = IndexHandle::create(schema.schema(), &options.index)?;

        let mut writer = handle.writer(options.commit_every.unwrap_or(FILE_COMMIT_EVERY))?;
        let mut skipped = 0usize;
        for entry in crawl::entries(&root).filter(|e| e.metadata.is_file()) {
            match read_file(&entry.path, options.mime_types.as_ref()) {
                Some((kind, content)) => {
                    let mut doc = TantivyDocument::new();
                    doc.add_text(schema.abs_path, entry.path.display());
                    doc.add_text(schema.mime_kind, kind.name());
                    doc.add_text(schema.file_name, &entry.file_name);
                    doc.add_text(schema.content, &content);
                    writer.add(doc)?;
                }
                None => skipped += 1,
            }
        }
        let records = writer.commit_and_close()?;
        handle.open_reader()?;
        info!(root = %root.display(), records, skipped, "content index ready");

        Ok(Self {
            core: SearchCore::new(handle, schema.content, options.max_results),
            schema,
        })
    }
}

/// Classifies and extracts one file. `None` means the file is skipped.
fn read_file(path: &Path, allowed: Option<&BTreeSet<MimeKind>>) -> Option<(MimeKind, String)> {
    let classified = match classify_file(path) {
        Ok(classified) => classified,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping file");
            return None;
        }
    };
    let kind = classified.kind;
    if !kind.is_extractable() {
        debug!(path = %path.display(), detected = %classified.detected, "unsupported type");
        return None;
    }
    if allowed.is_some_and(|allowed| !allowed.contains(&kind)) {
        debug!(path = %path.display(), kind = %kind, "type not in allow-list");
        return None;
    }
    match extract_text(path, kind) {
        Ok(content) => Some((kind, content)),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping file");
            None
        }
    }
}

impl Searcher for ContentSearcher {
    fn mode(&self) -> SearchMode {
        SearchMode::Content
    }

    fn core(&self) -> &SearchCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SearchCore {
        &mut self.core
    }

    fn format_match(&self, doc: &TantivyDocument) -> String {
        format!(
            "{:<3} | {:<40} | \"{}\"",
            text_field(doc, self.schema.mime_kind),
            text_field(doc, self.schema.file_name),
            text_field(doc, self.schema.abs_path),
        )
    }
}
