//! Searcher variants over the ephemeral index.
//!
//! Every variant goes through the same life: construction crawls its source and
//! populates a fresh index, commits it, then opens a reader. From then on queries can be
//! run any number of times until [`Searcher::close`] purges the storage. Variants differ
//! only in how they populate and how a stored record is displayed.

mod content;
mod lines;
mod metadata;

use std::path::Path;

use tantivy::{
    DocAddress, TantivyDocument,
    collector::{Count, TopDocs},
    query::Query,
    schema::{Field, Value},
};

pub use self::{
    content::ContentSearcher,
    lines::LineStreamSearcher,
    metadata::{EntryType, MetadataSearcher},
};
use crate::{IndexHandle, QueryBuilder, SearchError, SearchMode};

/// Commit interval for filesystem crawls.
pub const FILE_COMMIT_EVERY: usize = 50;

/// Commit interval for line streams.
pub const LINE_COMMIT_EVERY: usize = 500;

/// A populated, queryable index.
///
/// Implementors supply their mode, their [`SearchCore`] and a formatter for stored
/// records; querying, inspection and teardown are shared.
pub trait Searcher {
    /// Which kind of records this searcher holds.
    fn mode(&self) -> SearchMode;

    /// Shared index state.
    fn core(&self) -> &SearchCore;

    /// Shared index state, mutably.
    fn core_mut(&mut self) -> &mut SearchCore;

    /// Renders one stored record as a display line.
    fn format_match(&self, doc: &TantivyDocument) -> String;

    /// Runs a free-text query and returns formatted matches, best first.
    fn query(&self, text: &str) -> Result<Vec<String>, SearchError> {
        let query = self.core().builder().build(text)?;
        self.core().run(&*query, |doc| self.format_match(doc))
    }

    /// Runs a raw query expression against the searched field.
    fn query_expression(&self, expression: &str) -> Result<Vec<String>, SearchError> {
        let core = self.core();
        let query = core.builder().parse_expression(core.handle.index()?, expression)?;
        core.run(&*query, |doc| self.format_match(doc))
    }

    /// Every stored record, formatted, in index order.
    fn records(&self) -> Result<Vec<String>, SearchError> {
        self.core().all(|doc| self.format_match(doc))
    }

    /// Number of records in the index.
    fn record_count(&self) -> Result<u64, SearchError> {
        Ok(self.core().handle.searcher()?.num_docs())
    }

    /// Backing storage directory, while open and on disk.
    fn location(&self) -> Option<&Path> {
        self.core().handle.location()
    }

    /// True once closed.
    fn is_closed(&self) -> bool {
        self.core().handle.is_closed()
    }

    /// Drops the reader and purges the storage. Idempotent.
    fn close(&mut self) {
        self.core_mut().handle.close();
    }
}

/// Index state shared by every variant.
pub struct SearchCore {
    /// Owned index and storage.
    handle: IndexHandle,
    /// Query builder bound to the searched field.
    builder: QueryBuilder,
    /// Optional cap on matches per query.
    max_results: Option<usize>,
}

impl SearchCore {
    /// Wraps a populated handle whose reader is already open.
    pub(crate) fn new(handle: IndexHandle, field: Field, max_results: Option<usize>) -> Self {
        Self {
            handle,
            builder: QueryBuilder::new(field),
            max_results,
        }
    }

    /// Query builder for the searched field.
    pub fn builder(&self) -> &QueryBuilder {
        &self.builder
    }

    /// Evaluates `query` and formats every hit (or the first `max_results`).
    fn run<F>(&self, query: &dyn Query, format: F) -> Result<Vec<String>, SearchError>
    where
        F: Fn(&TantivyDocument) -> String,
    {
        let searcher = self.handle.searcher()?;
        let total = searcher
            .search(query, &Count)
            .map_err(|e| SearchError::search(&e))?;
        let limit = self.max_results.map_or(total, |cap| cap.min(total));
        if limit == 0 {
            return Ok(Vec::new());
        }

        let hits = searcher
            .search(query, &TopDocs::with_limit(limit))
            .map_err(|e| SearchError::search(&e))?;
        hits.into_iter()
            .map(|(_score, address)| {
                let doc: TantivyDocument = searcher.doc(address).map_err(|e| SearchError::search(&e))?;
                Ok(format(&doc))
            })
            .collect()
    }

    /// Formats every live document, segment by segment.
    fn all<F>(&self, format: F) -> Result<Vec<String>, SearchError>
    where
        F: Fn(&TantivyDocument) -> String,
    {
        let searcher = self.handle.searcher()?;
        let mut records = Vec::with_capacity(searcher.num_docs() as usize);
        for (ordinal, segment) in searcher.segment_readers().iter().enumerate() {
            for doc_id in segment.doc_ids_alive() {
                let address = DocAddress::new(ordinal as u32, doc_id);
                let doc: TantivyDocument = searcher.doc(address).map_err(|e| SearchError::search(&e))?;
                records.push(format(&doc));
            }
        }
        Ok(records)
    }
}

/// Reads a stored text field, or an empty string when absent.
fn text_field(doc: &TantivyDocument, field: Field) -> &str {
    doc.get_first(field).and_then(|v| v.as_str()).unwrap_or("")
}
