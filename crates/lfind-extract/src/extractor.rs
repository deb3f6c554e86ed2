//! Extractor capability and the shared, lazily built extractor table.

use std::{path::Path, sync::OnceLock};

use crate::{DocExtractor, ExtractError, MimeKind, PdfExtractor, TextExtractor};

/// Produces the textual content of a file as a sequence of chunks.
///
/// Chunk granularity is format-specific (lines, paragraphs, page blocks). Implementations
/// hold no per-call state, so a single instance is shared across the process.
pub trait Extractor: Send + Sync {
    /// Streams the file's text, calling `emit` once per chunk.
    fn read_content(&self, path: &Path, emit: &mut dyn FnMut(&str)) -> Result<(), ExtractError>;
}

/// One lazily constructed extractor per extractable kind.
struct ExtractorTable {
    /// PDF extractor.
    pdf: OnceLock<PdfExtractor>,
    /// Word extractor.
    doc: OnceLock<DocExtractor>,
    /// Plain text extractor.
    text: OnceLock<TextExtractor>,
}

/// Process-wide extractor table.
static EXTRACTORS: ExtractorTable = ExtractorTable {
    pdf: OnceLock::new(),
    doc: OnceLock::new(),
    text: OnceLock::new(),
};

/// Returns the extractor for a kind, constructing it on first use.
///
/// [`MimeKind::Other`] has no extractor.
pub fn extractor(kind: MimeKind) -> Option<&'static dyn Extractor> {
    match kind {
        MimeKind::Pdf => Some(EXTRACTORS.pdf.get_or_init(PdfExtractor::default)),
        MimeKind::Doc => Some(EXTRACTORS.doc.get_or_init(DocExtractor::default)),
        MimeKind::Text => Some(EXTRACTORS.text.get_or_init(TextExtractor::default)),
        MimeKind::Other => None,
    }
}
