//! Ephemeral index storage: create, populate, commit, read, close.
//!
//! An [`IndexHandle`] owns one index for one run. Storage is a fresh private directory
//! (or RAM) that is removed when the handle is closed or dropped, whichever comes first.
//! Population goes through a [`RecordWriter`] that mutably borrows the handle, so a
//! reader can only be opened once the writer has been committed and consumed.

use std::{
    env,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use tantivy::{
    Index, IndexReader, IndexWriter as TantivyIndexWriter, ReloadPolicy,
    Searcher as StoreSearcher, TantivyDocument, schema::Schema,
};
use tempfile::TempDir;
use tracing::{debug, info, warn};

use crate::{IndexError, SearchError, analyzer};

/// Prefix for backing storage directories.
const STORAGE_PREFIX: &str = "lfind-index-";

/// Where and how an index is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    /// Keep the index in RAM instead of a temporary directory.
    pub in_memory: bool,
    /// Writer memory budget in bytes.
    pub heap_size: usize,
    /// Parent directory for the backing storage. System temp dir when `None`.
    pub temp_dir: Option<PathBuf>,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            in_memory: false,
            heap_size: lfind_config::DEFAULT_HEAP_SIZE,
            temp_dir: None,
        }
    }
}

/// Backing storage of an index.
#[derive(Debug)]
enum Storage {
    /// Private temporary directory, deleted on close.
    Disk(TempDir),
    /// RAM directory owned by the index itself.
    Memory,
}

/// Owns an ephemeral index and its storage.
pub struct IndexHandle {
    /// The index. `None` once closed.
    index: Option<Index>,
    /// Read handle, opened after population.
    reader: Option<IndexReader>,
    /// Backing storage. `None` once purged.
    storage: Option<Storage>,
    /// Writer memory budget.
    heap_size: usize,
}

impl IndexHandle {
    /// Creates an empty index with the given schema.
    ///
    /// The lfind analyzer is registered before anything is written.
    pub fn create(schema: &Schema, options: &IndexOptions) -> Result<Self, IndexError> {
        let (index, storage) = if options.in_memory {
            (Index::create_in_ram(schema.clone()), Storage::Memory)
        } else {
            let dir = create_storage_dir(options.temp_dir.as_deref())?;
            // On failure `dir` is dropped here, which removes it.
            let index = Index::create_in_dir(dir.path(), schema.clone())
                .map_err(|e| IndexError::open_index(dir.path().to_path_buf(), &e))?;
            (index, Storage::Disk(dir))
        };
        analyzer::register(&index);

        let handle = Self {
            index: Some(index),
            reader: None,
            storage: Some(storage),
            heap_size: options.heap_size,
        };
        debug!(location = %handle.describe_location(), "created index");
        Ok(handle)
    }

    /// Opens the single write handle.
    ///
    /// An intermediate commit happens every `commit_every` records.
    pub fn writer(&mut self, commit_every: usize) -> Result<RecordWriter<'_>, IndexError> {
        let location = self.describe_location();
        let index = self
            .index
            .as_ref()
            .ok_or_else(|| IndexError::Write("index is closed".to_string()))?;
        // Population is sequential; one indexing thread is all it needs.
        let writer = index
            .writer_with_num_threads(1, self.heap_size)
            .map_err(|e| IndexError::open_index(PathBuf::from(location), &e))?;
        Ok(RecordWriter {
            writer,
            commit_every: commit_every.max(1),
            pending: 0,
            written: 0,
            handle: PhantomData,
        })
    }

    /// Opens the read-only handle over everything committed so far.
    pub fn open_reader(&mut self) -> Result<(), IndexError> {
        let index = self
            .index
            .as_ref()
            .ok_or_else(|| IndexError::Reader("index is closed".to_string()))?;
        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e: tantivy::TantivyError| IndexError::Reader(e.to_string()))?;
        self.reader = Some(reader);
        Ok(())
    }

    /// Returns the underlying index.
    pub fn index(&self) -> Result<&Index, SearchError> {
        self.index.as_ref().ok_or(SearchError::Closed)
    }

    /// Returns a point-in-time searcher.
    pub fn searcher(&self) -> Result<StoreSearcher, SearchError> {
        self.reader
            .as_ref()
            .map(IndexReader::searcher)
            .ok_or(SearchError::Closed)
    }

    /// Returns the storage directory, if the index lives on disk and is still open.
    pub fn location(&self) -> Option<&Path> {
        match &self.storage {
            Some(Storage::Disk(dir)) => Some(dir.path()),
            _ => None,
        }
    }

    /// Returns true once [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        self.index.is_none()
    }

    /// Releases the reader and index, then deletes the backing storage.
    ///
    /// Deletion failures are logged, never returned. Calling this again is a no-op.
    pub fn close(&mut self) {
        self.reader = None;
        self.index = None;
        match self.storage.take() {
            Some(Storage::Disk(dir)) => {
                let path = dir.path().to_path_buf();
                match dir.close() {
                    Ok(()) => debug!(path = %path.display(), "removed index storage"),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to remove index storage");
                    }
                }
            }
            Some(Storage::Memory) => debug!("released in-memory index"),
            None => {}
        }
    }

    /// Human-readable storage location for logs and errors.
    fn describe_location(&self) -> String {
        match &self.storage {
            Some(Storage::Disk(dir)) => dir.path().display().to_string(),
            Some(Storage::Memory) => "<memory>".to_string(),
            None => "<closed>".to_string(),
        }
    }
}

impl Drop for IndexHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Creates a fresh, uniquely named storage directory.
fn create_storage_dir(parent: Option<&Path>) -> Result<TempDir, IndexError> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(STORAGE_PREFIX);
    let result = match parent {
        Some(parent) => builder.tempdir_in(parent),
        None => builder.tempdir(),
    };
    result.map_err(|e| IndexError::OpenIndex {
        path: parent.map_or_else(env::temp_dir, Path::to_path_buf),
        message: e.to_string(),
    })
}

/// Exclusive write access to an [`IndexHandle`] during population.
pub struct RecordWriter<'a> {
    /// The underlying Tantivy writer.
    writer: TantivyIndexWriter,
    /// Records between intermediate commits.
    commit_every: usize,
    /// Records added since the last commit.
    pending: usize,
    /// Records added in total.
    written: usize,
    /// Ties the writer to the handle it populates.
    handle: PhantomData<&'a mut IndexHandle>,
}

impl RecordWriter<'_> {
    /// Adds one record, committing if the interval has been reached.
    pub fn add(&mut self, doc: TantivyDocument) -> Result<(), IndexError> {
        self.writer
            .add_document(doc)
            .map_err(|e| IndexError::write(&e))?;
        self.written += 1;
        self.pending += 1;
        if self.pending >= self.commit_every {
            self.writer.commit().map_err(|e| IndexError::commit(&e))?;
            self.pending = 0;
            info!(records = self.written, "indexed");
        }
        Ok(())
    }

    /// Number of records added so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Commits outstanding records and shuts the writer down.
    ///
    /// Returns the total number of records written.
    pub fn commit_and_close(mut self) -> Result<usize, IndexError> {
        self.writer.commit().map_err(|e| IndexError::commit(&e))?;
        self.writer
            .wait_merging_threads()
            .map_err(|e| IndexError::commit(&e))?;
        debug!(records = self.written, "committed index");
        Ok(self.written)
    }
}
