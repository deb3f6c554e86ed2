//! Text analysis pipeline for lfind indexes.
//!
//! Every field is analyzed the same way:
//! 1. `WhitespaceTokenizer` - splits on whitespace only, so `a.txt` stays one token
//! 2. `LowerCaser` - normalizes tokens to lowercase
//! 3. `RemoveLongFilter` - drops tokens longer than 255 bytes
//!
//! Query tokens are split and lowercased the same way, which is what lets wildcard and
//! prefix clauses match whole file names and raw words.

use tantivy::{
    Index,
    tokenizer::{LowerCaser, RemoveLongFilter, TextAnalyzer, WhitespaceTokenizer},
};

/// Name of the custom tokenizer registered with Tantivy.
pub const LFIND_TOKENIZER: &str = "lfind_text";

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 255;

/// Builds the lfind text analyzer.
pub fn build_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(WhitespaceTokenizer::default())
        .filter(LowerCaser)
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
        .build()
}

/// Registers the analyzer on an index under [`LFIND_TOKENIZER`].
pub fn register(index: &Index) {
    index.tokenizers().register(LFIND_TOKENIZER, build_analyzer());
}
