//! Content-type detection.
//!
//! The extension is consulted first. Files with no recognizable extension are sniffed:
//! a prefix free of NUL bytes that decodes as UTF-8 is treated as `text/plain`.

use std::{
    fs::File,
    io::Read,
    path::Path,
    str,
};

use crate::ExtractError;

/// Number of leading bytes inspected when sniffing.
const SNIFF_LEN: usize = 8192;

/// Reported for content that looks binary.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Reported for content that looks like text.
pub const TEXT_PLAIN: &str = "text/plain";

/// Detects the content type of a file.
pub fn detect(path: &Path) -> Result<String, ExtractError> {
    if let Some(mime) = mime_guess::from_path(path).first() {
        return Ok(mime.essence_str().to_string());
    }

    sniff(path)
}

/// Guesses text vs. binary from the first bytes of a file.
fn sniff(path: &Path) -> Result<String, ExtractError> {
    let detection = |source| ExtractError::Detection {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(detection)?;
    let mut prefix = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64)
        .read_to_end(&mut prefix)
        .map_err(detection)?;

    let kind = if looks_like_text(&prefix) {
        TEXT_PLAIN
    } else {
        OCTET_STREAM
    };
    Ok(kind.to_string())
}

/// Returns true if a byte prefix is NUL-free UTF-8.
///
/// A multi-byte sequence cut off by the end of the prefix still counts as text.
fn looks_like_text(prefix: &[u8]) -> bool {
    if prefix.contains(&0) {
        return false;
    }

    match str::from_utf8(prefix) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn known_extensions() {
        let temp = TempDir::new().unwrap();
        for (name, expected) in [
            ("notes.txt", "text/plain"),
            ("report.pdf", "application/pdf"),
            ("letter.doc", "application/msword"),
            ("image.png", "image/png"),
        ] {
            let path = temp.path().join(name);
            fs::write(&path, b"x").unwrap();
            assert_eq!(detect(&path).unwrap(), expected, "{name}");
        }
    }

    #[test]
    fn sniffs_text_without_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("README");
        fs::write(&path, "plain words\nand more").unwrap();
        assert_eq!(detect(&path).unwrap(), TEXT_PLAIN);
    }

    #[test]
    fn sniffs_binary_without_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("blob");
        fs::write(&path, [0x7f, b'E', b'L', b'F', 0, 1, 2]).unwrap();
        assert_eq!(detect(&path).unwrap(), OCTET_STREAM);
    }

    #[test]
    fn truncated_utf8_is_still_text() {
        // "é" is two bytes; keep only the first
        assert!(looks_like_text(&[b'a', 0xc3]));
        assert!(!looks_like_text(&[b'a', 0xff, b'b']));
    }

    #[test]
    fn missing_file_is_detection_error() {
        let temp = TempDir::new().unwrap();
        let err = detect(&temp.path().join("gone")).unwrap_err();
        assert!(matches!(err, ExtractError::Detection { .. }));
    }
}
