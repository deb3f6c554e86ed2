//! Field layouts for the three index shapes.
//!
//! Each searcher queries exactly one analyzed field and reads its display values back
//! from stored fields:
//! - metadata: `file_name` (analyzed, stored), `abs_path` and `entry_type` (stored)
//! - content: `content` (analyzed, not stored), `abs_path`, `mime_kind` and `file_name` (stored)
//! - lines: `line` (analyzed, stored)

use tantivy::schema::{
    Field, IndexRecordOption, STORED, Schema, TextFieldIndexing, TextOptions,
};

use crate::analyzer::LFIND_TOKENIZER;

/// Analyzed text with positions, so phrase clauses work.
fn analyzed(stored: bool) -> TextOptions {
    let options = TextOptions::default().set_indexing_options(
        TextFieldIndexing::default()
            .set_tokenizer(LFIND_TOKENIZER)
            .set_index_option(IndexRecordOption::WithFreqsAndPositions),
    );
    if stored { options.set_stored() } else { options }
}

/// Schema for the metadata index.
#[derive(Debug, Clone)]
pub struct MetadataSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Entry name, the queried field.
    pub file_name: Field,
    /// Absolute path of the entry.
    pub abs_path: Field,
    /// `FILE` or `DIR`.
    pub entry_type: Field,
}

impl MetadataSchema {
    /// Creates the metadata schema.
    pub fn new() -> Self {
        let mut builder = Schema::builder();
        let file_name = builder.add_text_field("file_name", analyzed(true));
        let abs_path = builder.add_text_field("abs_path", STORED);
        let entry_type = builder.add_text_field("entry_type", STORED);
        Self {
            schema: builder.build(),
            file_name,
            abs_path,
            entry_type,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Default for MetadataSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Schema for the content index.
#[derive(Debug, Clone)]
pub struct ContentSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Absolute path of the file.
    pub abs_path: Field,
    /// Classified kind, e.g. `TEXT`.
    pub mime_kind: Field,
    /// File name.
    pub file_name: Field,
    /// Extracted text, the queried field. Indexed only.
    pub content: Field,
}

impl ContentSchema {
    /// Creates the content schema.
    pub fn new() -> Self {
        let mut builder = Schema::builder();
        let abs_path = builder.add_text_field("abs_path", STORED);
        let mime_kind = builder.add_text_field("mime_kind", STORED);
        let file_name = builder.add_text_field("file_name", STORED);
        let content = builder.add_text_field("content", analyzed(false));
        Self {
            schema: builder.build(),
            abs_path,
            mime_kind,
            file_name,
            content,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Default for ContentSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Schema for the line-stream index.
#[derive(Debug, Clone)]
pub struct LineSchema {
    /// The underlying Tantivy schema.
    schema: Schema,
    /// Line text, queried and displayed.
    pub line: Field,
}

impl LineSchema {
    /// Creates the line schema.
    pub fn new() -> Self {
        let mut builder = Schema::builder();
        let line = builder.add_text_field("line", analyzed(true));
        Self {
            schema: builder.build(),
            line,
        }
    }

    /// Returns a reference to the underlying Tantivy schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl Default for LineSchema {
    fn default() -> Self {
        Self::new()
    }
}
