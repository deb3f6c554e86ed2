//! Kind-based extraction dispatch.

use std::path::Path;

use tracing::trace;

use crate::{ExtractError, MimeKind, detect, extractor};

/// A file's detected content type and its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    /// Content-type string as detected.
    pub detected: String,
    /// Coarse kind derived from `detected`.
    pub kind: MimeKind,
}

/// Detects and classifies a file.
pub fn classify_file(path: &Path) -> Result<Classified, ExtractError> {
    let detected = detect(path)?;
    let kind = MimeKind::classify(&detected);
    trace!(path = %path.display(), detected = %detected, kind = %kind, "classified");
    Ok(Classified { detected, kind })
}

/// Streams the text chunks of a file through the extractor for `kind`.
pub fn extract(path: &Path, kind: MimeKind, emit: &mut dyn FnMut(&str)) -> Result<(), ExtractError> {
    let Some(extractor) = extractor(kind) else {
        return Err(ExtractError::Unsupported {
            path: path.to_path_buf(),
        });
    };
    extractor.read_content(path, emit)
}

/// Extracts a file's full text, chunks joined by newlines.
///
/// Nothing is returned unless extraction succeeds, so a file that fails part way never
/// contributes partial content.
pub fn extract_text(path: &Path, kind: MimeKind) -> Result<String, ExtractError> {
    let mut content = String::new();
    extract(path, kind, &mut |chunk| {
        if !content.is_empty() {
            content.push('\n');
        }
        content.push_str(chunk);
    })?;
    Ok(content)
}
