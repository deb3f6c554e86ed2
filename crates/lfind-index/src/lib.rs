//! Ephemeral search indexes for lfind.
//!
//! A run builds one index, answers queries against it, and throws it away:
//! - [`SearchMode`] picks what to index (file names, file contents, or piped lines)
//! - [`build_searcher`] crawls the source into a fresh [`IndexHandle`]
//! - [`Searcher::query`] turns free text into clauses via [`QueryBuilder`]
//! - [`Searcher::close`] purges the storage
//!
//! # Example
//!
//! ```no_run
//! use std::io;
//!
//! use lfind_index::{SearchMode, SearchOptions, build_searcher};
//!
//! let options = SearchOptions::new(".");
//! let mut searcher = build_searcher(SearchMode::Metadata, &options, io::empty()).unwrap();
//! for line in searcher.query("cargo toml").unwrap() {
//!     println!("{line}");
//! }
//! searcher.close();
//! ```

#![warn(missing_docs)]

mod analyzer;
mod crawl;
mod error;
mod lifecycle;
mod mode;
mod options;
mod query;
mod schema;
mod searcher;

pub use analyzer::{LFIND_TOKENIZER, build_analyzer};
pub use crawl::{CrawlEntry, entries as crawl_entries, validate_root};
pub use error::{IndexError, SearchError};
pub use lifecycle::{IndexHandle, IndexOptions, RecordWriter};
pub use mode::{SearchMode, build_searcher, stdin_has_data};
pub use options::SearchOptions;
pub use query::{Clause, QueryBuilder, QueryPlan};
pub use schema::{ContentSchema, LineSchema, MetadataSchema};
pub use searcher::{
    ContentSearcher, EntryType, FILE_COMMIT_EVERY, LINE_COMMIT_EVERY, LineStreamSearcher,
    MetadataSearcher, SearchCore, Searcher,
};
