//! Plain text extraction.

use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use crate::{ExtractError, Extractor};

/// Emits a text file line by line.
#[derive(Debug, Default)]
pub struct TextExtractor;

impl Extractor for TextExtractor {
    fn read_content(&self, path: &Path, emit: &mut dyn FnMut(&str)) -> Result<(), ExtractError> {
        let file = File::open(path).map_err(|e| ExtractError::io(path, e))?;
        for_each_line(BufReader::new(file), |line| emit(line)).map_err(|e| ExtractError::io(path, e))
    }
}

/// Calls `f` for every line of `reader`.
///
/// Lines are split on `\n`, a trailing `\r` is dropped, and invalid UTF-8 is replaced
/// rather than treated as an error. A final line without a terminator is still emitted.
pub fn for_each_line<R: BufRead>(mut reader: R, mut f: impl FnMut(&str)) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line: Cow<'_, str> = String::from_utf8_lossy(strip_line_ending(&buf));
        f(&line);
    }
}

/// Removes a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
