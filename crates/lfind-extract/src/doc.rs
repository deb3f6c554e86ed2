//! Word document extraction.
//!
//! A `.docx` file is a zip archive of WordprocessingML parts. The main body lives in
//! `word/document.xml`; headers, footers and comments live in sibling parts. Each
//! `<w:p>` paragraph becomes one chunk. Legacy binary `.doc` files are not zip archives
//! and fail to open, which the caller treats as a per-file skip.

use std::{
    fs::File,
    io::{BufRead, BufReader, Read, Seek},
    path::Path,
};

use quick_xml::{Reader, events::Event};
use tracing::debug;
use zip::ZipArchive;

use crate::{ExtractError, Extractor};

/// Archive member holding the document body.
const MAIN_PART: &str = "word/document.xml";

/// Archive member holding review comments.
const COMMENTS_PART: &str = "word/comments.xml";

/// Emits the paragraphs of an Office Open XML document.
#[derive(Debug, Default)]
pub struct DocExtractor;

impl Extractor for DocExtractor {
    fn read_content(&self, path: &Path, emit: &mut dyn FnMut(&str)) -> Result<(), ExtractError> {
        let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
        let mut archive = ZipArchive::new(file).map_err(|e| ExtractError::doc(path, e))?;

        let body = archive
            .by_name(MAIN_PART)
            .map_err(|e| ExtractError::doc(path, format!("{MAIN_PART}: {e}")))?;
        read_paragraphs(BufReader::new(body), emit).map_err(|e| ExtractError::doc(path, e))?;

        // Secondary parts are best effort: a damaged header should not hide the body.
        for part in secondary_parts(&archive) {
            let result = match archive.by_name(&part) {
                Ok(entry) => read_paragraphs(BufReader::new(entry), emit).map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            if let Err(message) = result {
                debug!(path = %path.display(), part = %part, error = %message, "skipping document part");
            }
        }
        Ok(())
    }
}

/// Lists header, footer and comment parts in a stable order.
fn secondary_parts<R: Read + Seek>(archive: &ZipArchive<R>) -> Vec<String> {
    let mut parts: Vec<String> = archive
        .file_names()
        .filter(|name| is_secondary_part(name))
        .map(str::to_string)
        .collect();
    parts.sort_by_key(|name| (part_rank(name), name.clone()));
    parts
}

/// True for `word/header*.xml`, `word/footer*.xml` and `word/comments.xml`.
fn is_secondary_part(name: &str) -> bool {
    let header_or_footer = (name.starts_with("word/header") || name.starts_with("word/footer"))
        && name.ends_with(".xml");
    header_or_footer || name == COMMENTS_PART
}

/// Headers first, then footers, then comments.
fn part_rank(name: &str) -> u8 {
    if name.starts_with("word/header") {
        0
    } else if name.starts_with("word/footer") {
        1
    } else {
        2
    }
}

/// Streams the non-blank paragraphs of a WordprocessingML part.
///
/// Text runs (`<w:t>`) are concatenated; tabs and breaks become a single space.
fn read_paragraphs<R: BufRead>(input: R, emit: &mut dyn FnMut(&str)) -> Result<(), quick_xml::Error> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();
    let mut paragraph = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.local_name().as_ref() == b"t" => in_text = true,
            Event::Empty(e) if matches!(e.local_name().as_ref(), b"tab" | b"br" | b"cr") => {
                paragraph.push(' ');
            }
            Event::Text(t) if in_text => paragraph.push_str(&t.unescape()?),
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let text = paragraph.trim();
                    if !text.is_empty() {
                        emit(text);
                    }
                    paragraph.clear();
                }
                _ => {}
            },
            Event::Eof => return Ok(()),
            _ => {}
        }
        buf.clear();
    }
}
