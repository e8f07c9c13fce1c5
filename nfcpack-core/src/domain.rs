use std::io;

use crate::batch::source::RawFile;

/// Where a batch came from. Supplied explicitly by the caller instead
/// of being inferred from incidental per-file metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchOrigin {
    Flat,
    Folder,
}

/// Top-level folder name of a folder-origin batch, already normalized.
/// Names the output archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderContext {
    pub folder_name: String,
}

/// One ingested file: the original and normalized name/path pair, the
/// changed flag, and the content handle. Name fields are computed once
/// at ingestion and never touched again; bytes stay with the source
/// until export.
pub struct FileRecord {
    pub original_name: String,
    pub original_path: String,
    pub normalized_name: String,
    pub normalized_path: String,
    /// True iff normalization altered the name or the path.
    pub changed: bool,
    pub size: u64,
    /// Ingest-time availability probe. Records stay in the batch when
    /// this is false; they are only skipped (and counted) at export.
    pub available: bool,
    pub(crate) content: Box<dyn RawFile>,
}

impl FileRecord {
    pub fn read_content(&self) -> io::Result<Vec<u8>> {
        self.content.read()
    }
}

impl std::fmt::Debug for FileRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRecord")
            .field("original_path", &self.original_path)
            .field("normalized_path", &self.normalized_path)
            .field("changed", &self.changed)
            .field("size", &self.size)
            .field("available", &self.available)
            .finish_non_exhaustive()
    }
}

/// Ordered outcome of one batch run. Record order equals input
/// enumeration order. Each submission produces a fresh owned value;
/// dropping it releases every content handle.
pub struct BatchResult {
    pub records: Vec<FileRecord>,
    pub origin: BatchOrigin,
    /// Present for folder-origin batches with at least one multi-segment
    /// path.
    pub folder: Option<FolderContext>,
}

impl BatchResult {
    pub fn empty(origin: BatchOrigin) -> Self {
        Self {
            records: Vec::new(),
            origin,
            folder: None,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn changed_count(&self) -> usize {
        self.records.iter().filter(|r| r.changed).count()
    }

    pub fn unavailable_count(&self) -> usize {
        self.records.iter().filter(|r| !r.available).count()
    }
}
