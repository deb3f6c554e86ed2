//! Content classification and text extraction for lfind.
//!
//! Files are first classified into a [`MimeKind`] from their detected content type. Each
//! extractable kind has one shared [`Extractor`] that streams the file's text as chunks:
//!
//! - **Text**: one chunk per line
//! - **Doc**: one chunk per paragraph of an Office Open XML document
//! - **PDF**: one chunk per blank-line separated block
//!
//! Every failure is scoped to a single file and reported as an [`ExtractError`].

#![warn(missing_docs)]

mod detect;
mod dispatch;
mod doc;
mod error;
mod extractor;
mod mime;
mod pdf;
mod text;

pub use detect::{OCTET_STREAM, TEXT_PLAIN, detect};
pub use dispatch::{Classified, classify_file, extract, extract_text};
pub use doc::DocExtractor;
pub use error::ExtractError;
pub use extractor::{Extractor, extractor};
pub use mime::MimeKind;
pub use pdf::PdfExtractor;
pub use text::{TextExtractor, for_each_line};
