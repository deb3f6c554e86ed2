//! Error types for the lfind-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that abort building a searcher.
///
/// Without an index no query can be answered, so every variant is fatal for the run.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to create or open the index storage.
    #[error("failed to open index at {path}: {message}")]
    OpenIndex {
        /// Storage location (or `<memory>`).
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to write to the index.
    #[error("failed to write to index: {0}")]
    Write(String),

    /// Failed to commit changes to the index.
    #[error("failed to commit index: {0}")]
    Commit(String),

    /// Failed to open a reader over the committed index.
    #[error("failed to open index reader: {0}")]
    Reader(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The crawl root does not exist.
    #[error("invalid value '{}': path does not exist", path.display())]
    RootNotFound {
        /// Root as given.
        path: PathBuf,
    },

    /// The crawl root is not a directory.
    #[error("{} is not a directory", path.display())]
    RootNotDirectory {
        /// Root as given.
        path: PathBuf,
    },

    /// Failed to read the line stream.
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),
}

impl IndexError {
    /// Creates an `OpenIndex` error from a path and Tantivy error.
    pub(crate) fn open_index(path: PathBuf, source: &tantivy::TantivyError) -> Self {
        Self::OpenIndex {
            path,
            message: source.to_string(),
        }
    }

    /// Creates a `Write` error from a Tantivy error.
    pub(crate) fn write(source: &tantivy::TantivyError) -> Self {
        Self::Write(source.to_string())
    }

    /// Creates a `Commit` error from a Tantivy error.
    pub(crate) fn commit(source: &tantivy::TantivyError) -> Self {
        Self::Commit(source.to_string())
    }
}

/// Errors scoped to a single query.
///
/// The searcher stays usable after any of these except [`SearchError::Closed`].
#[derive(Debug, Error)]
pub enum SearchError {
    /// The searcher has been closed.
    #[error("searcher is closed")]
    Closed,

    /// A raw expression could not be parsed.
    #[error("invalid query expression '{query}': {message}")]
    QuerySyntax {
        /// Expression as given.
        query: String,
        /// Parser message.
        message: String,
    },

    /// The index failed while evaluating a query.
    #[error("search failed: {0}")]
    Search(String),
}

impl SearchError {
    /// Creates a `Search` error from a Tantivy error.
    pub(crate) fn search(source: &tantivy::TantivyError) -> Self {
        Self::Search(source.to_string())
    }
}
