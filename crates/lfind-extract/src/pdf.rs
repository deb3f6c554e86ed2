//! PDF extraction.

use std::{
    any::Any,
    cell::Cell,
    panic::{self, UnwindSafe},
    path::Path,
    sync::Once,
    thread,
};

use tracing::debug;

use crate::{ExtractError, Extractor};

/// Emits the text blocks of a PDF.
///
/// The parser's output is split on blank lines; each block has its internal whitespace
/// folded to single spaces and becomes one chunk.
#[derive(Debug, Default)]
pub struct PdfExtractor;

impl Extractor for PdfExtractor {
    fn read_content(&self, path: &Path, emit: &mut dyn FnMut(&str)) -> Result<(), ExtractError> {
        // The parser panics on some malformed inputs; contain that to this file.
        let text = match quietly(|| pdf_extract::extract_text(path)) {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return Err(pdf_error(path, format!("{e:?}"))),
            Err(payload) => {
                let message = format!("parser panicked: {}", panic_message(&*payload));
                return Err(pdf_error(path, message));
            }
        };
        let mut blocks = 0usize;
        for block in text_blocks(&text) {
            emit(&block);
            blocks += 1;
        }
        debug!(path = %path.display(), blocks, "extracted pdf");
        Ok(())
    }
}

/// Builds a `Pdf` error.
fn pdf_error(path: &Path, message: impl Into<String>) -> ExtractError {
    ExtractError::Pdf {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

thread_local! {
    /// Set while this thread runs the parser under [`quietly`].
    static QUIET: Cell<bool> = const { Cell::new(false) };
}

/// Guards installation of the filtering panic hook.
static HOOK: Once = Once::new();

/// Runs `f`, catching a panic without letting the panic hook print it.
///
/// The previous hook still runs for panics on other threads, or outside `quietly`.
fn quietly<T>(f: impl FnOnce() -> T + UnwindSafe) -> thread::Result<T> {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if QUIET.with(Cell::get) {
                debug!(panic = %info, "suppressed parser panic");
            } else {
                previous(info);
            }
        }));
    });

    QUIET.with(|q| q.set(true));
    let result = panic::catch_unwind(f);
    QUIET.with(|q| q.set(false));
    result
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Splits parser output into blank-line separated blocks with folded whitespace.
fn text_blocks(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split("\n\n")
        .map(|block| block.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|block| !block.is_empty())
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn folds_blocks() {
        let text = "Title line\n\nfirst para\ncontinues here\n\n\n\nlast  one\n";
        let blocks: Vec<String> = text_blocks(text).collect();
        assert_eq!(blocks, vec!["Title line", "first para continues here", "last one"]);
    }

    #[test]
    fn blank_output_has_no_blocks() {
        assert_eq!(text_blocks("\n\n  \n\n").count(), 0);
    }

    #[test]
    fn parser_panics_are_caught_and_described() {
        let payload = quietly(|| -> () { panic!("bad xref at {}", 12) }).unwrap_err();
        assert_eq!(panic_message(&*payload), "bad xref at 12");

        let payload = quietly(|| -> () { panic!("static message") }).unwrap_err();
        assert_eq!(panic_message(&*payload), "static message");

        // The flag is cleared afterwards, so later panics reach the normal hook.
        assert!(!QUIET.with(Cell::get));
        assert_eq!(quietly(|| 7).unwrap(), 7);
    }

    #[test]
    fn garbage_is_an_error_not_a_panic() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fake.pdf");
        fs::write(&path, b"this is not a pdf").unwrap();

        let err = PdfExtractor.read_content(&path, &mut |_| {}).unwrap_err();
        assert!(matches!(err, ExtractError::Pdf { .. }));
    }
}
