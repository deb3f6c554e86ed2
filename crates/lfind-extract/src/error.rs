//! Error types for the lfind-extract crate.

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Errors raised while detecting or extracting a single file.
///
/// All of these are recoverable per file: the caller logs them and moves on.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The content type of a file could not be detected.
    #[error("failed to detect content type of {path}: {source}")]
    Detection {
        /// File being inspected.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The PDF parser rejected the file.
    #[error("failed to extract PDF text from {path}: {message}")]
    Pdf {
        /// File being parsed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// The Word document could not be unpacked or parsed.
    #[error("failed to extract document text from {path}: {message}")]
    Doc {
        /// File being parsed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// No extractor exists for the file's kind.
    #[error("no extractor available for {path}")]
    Unsupported {
        /// File that was offered for extraction.
        path: PathBuf,
    },

    /// A MIME allow-list entry does not name an extractable kind.
    #[error("unknown MIME type '{0}' (expected pdf, doc or text)")]
    UnknownKind(String),
}

impl ExtractError {
    /// Creates an `Io` error for a path.
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a `Doc` error from any displayable parser error.
    pub(crate) fn doc(path: &Path, message: impl ToString) -> Self {
        Self::Doc {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}
