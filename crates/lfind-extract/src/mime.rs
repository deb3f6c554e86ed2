//! MIME classification.
//!
//! Maps a detected content-type string onto the small set of kinds lfind knows how to
//! extract text from. Classification is cheap and happens before any parsing, so
//! unsupported files are skipped without being opened by an extractor.

use std::{fmt, str::FromStr};

use crate::ExtractError;

/// Content types that are plain text in disguise.
const TEXT_TYPES: &[&str] = &[
    "application/x-bat",
    "application/json",
    "application/xml",
    "application/javascript",
    "application/x-sh",
    "application/x-shellscript",
    "application/toml",
    "application/x-yaml",
    "application/sql",
    "application/x-httpd-php",
    "application/markdown",
];

/// Content types handled by the Word extractor.
const DOC_TYPES: &[&str] = &[
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "doc",
];

/// Content types handled by the PDF extractor.
const PDF_TYPES: &[&str] = &["application/pdf", "pdf"];

/// Coarse classification of a file's content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MimeKind {
    /// Portable Document Format.
    Pdf,
    /// Word documents.
    Doc,
    /// Anything readable as lines of text.
    Text,
    /// Everything else. Never extracted.
    Other,
}

impl MimeKind {
    /// All kinds that have an extractor.
    pub const EXTRACTABLE: [Self; 3] = [Self::Pdf, Self::Doc, Self::Text];

    /// Classifies a detected content-type string.
    ///
    /// Anything starting with `text` is [`MimeKind::Text`]; otherwise the string is
    /// matched exactly against fixed tables, falling back to [`MimeKind::Other`].
    pub fn classify(detected: &str) -> Self {
        if detected.starts_with("text") {
            return Self::Text;
        }

        if PDF_TYPES.contains(&detected) {
            Self::Pdf
        } else if DOC_TYPES.contains(&detected) {
            Self::Doc
        } else if TEXT_TYPES.contains(&detected) {
            Self::Text
        } else {
            Self::Other
        }
    }

    /// Parses an allow-list entry such as `pdf`, ` Text ` or `application/msword`.
    ///
    /// Entries are trimmed and lowercased before classification. Entries that classify
    /// as [`MimeKind::Other`] are rejected since such files are never indexed.
    pub fn parse_allowed(value: &str) -> Result<Self, ExtractError> {
        let normalized = value.trim().to_lowercase();
        match Self::classify(&normalized) {
            Self::Other => Err(ExtractError::UnknownKind(value.trim().to_string())),
            kind => Ok(kind),
        }
    }

    /// Upper-case display name, as shown in content search results.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Doc => "DOC",
            Self::Text => "TEXT",
            Self::Other => "OTHER",
        }
    }

    /// Returns true if an extractor exists for this kind.
    pub fn is_extractable(self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl fmt::Display for MimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MimeKind {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_allowed(s)
    }
}
