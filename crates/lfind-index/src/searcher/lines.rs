//! Search over lines of a text stream.

use std::io::BufRead;

use lfind_extract::for_each_line;
use tantivy::TantivyDocument;
use tracing::info;

use super::{LINE_COMMIT_EVERY, SearchCore, Searcher, text_field};
use crate::{IndexError, IndexHandle, SearchMode, SearchOptions, schema::LineSchema};

/// Matches queries against individual lines read from a stream, usually stdin.
pub struct LineStreamSearcher {
    /// Field handles.
    schema: LineSchema,
    /// Shared index state.
    core: SearchCore,
}

impl LineStreamSearcher {
    /// Reads `input` to the end, indexing each non-blank line as one record.
    ///
    /// Lines are stored verbatim (minus the line terminator) so matches print exactly
    /// as they arrived.
    pub fn build<R: BufRead>(input: R, options: &SearchOptions) -> Result<Self, IndexError> {
        let schema = LineSchema::new();
        let mut handle = IndexHandle::create(schema.schema(), &options.index)?;

        let mut writer = handle.writer(options.commit_every.unwrap_or(LINE_COMMIT_EVERY))?;
        let mut failure = None;
        for_each_line(input, |line| {
            if failure.is_some() || line.trim().is_empty() {
                return;
            }
            let mut doc = TantivyDocument::new();
            doc.add_text(schema.line, line);
            if let Err(e) = writer.add(doc) {
                failure = Some(e);
            }
        })
        .map_err(IndexError::Input)?;
        if let Some(e) = failure {
            return Err(e);
        }
        let records = writer.commit_and_close()?;
        handle.open_reader()?;
        info!(records, "line index ready");

        Ok(Self {
            core: SearchCore::new(handle, schema.line, options.max_results),
            schema,
        })
    }
}

impl Searcher for LineStreamSearcher {
    fn mode(&self) -> SearchMode {
        SearchMode::PipedLines
    }

    fn core(&self) -> &SearchCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut SearchCore {
        &mut self.core
    }

    fn format_match(&self, doc: &TantivyDocument) -> String {
        text_field(doc, self.schema.line).to_string()
    }
}
