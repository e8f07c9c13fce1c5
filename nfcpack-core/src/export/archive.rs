use std::collections::HashSet;
use std::io::{Cursor, Write};

use tracing::warn;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::domain::BatchResult;
use crate::error::Result;
use crate::policy::{self, CollisionPolicy};

/// Knobs for the ZIP build.
#[derive(Clone, Debug)]
pub struct ArchiveOptions {
    /// Deflate level; `None` or `Some(0)` stores entries uncompressed.
    pub level: Option<i64>,
    pub collision: CollisionPolicy,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            level: Some(6),
            collision: CollisionPolicy::default(),
        }
    }
}

/// A finished archive: the container bytes, its suggested file name
/// (normalized folder label + `.zip`), and the entry/omission counts.
pub struct ArchiveOutput {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub entries: usize,
    pub omitted: usize,
}

/// Repack a batch into a single ZIP whose entry paths are the
/// normalized ones. Entry bytes are the original file bytes, verbatim;
/// only names change. Records whose content cannot be read are left
/// out and counted in `omitted`, never failing the rest of the batch.
pub fn build_archive(batch: &BatchResult, opts: Option<&ArchiveOptions>) -> Result<ArchiveOutput> {
    let defaults = ArchiveOptions::default();
    let opts = opts.unwrap_or(&defaults);

    let method = match opts.level {
        Some(l) if l > 0 => CompressionMethod::Deflated,
        _ => CompressionMethod::Stored,
    };
    let file_opts: SimpleFileOptions = SimpleFileOptions::default()
        .compression_method(method)
        .compression_level(match method {
            CompressionMethod::Deflated => opts.level,
            _ => None,
        });

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let mut taken: HashSet<String> = HashSet::new();
    let mut entries = 0usize;
    let mut omitted = 0usize;

    for record in &batch.records {
        if !record.available {
            warn!(path = %record.original_path, "omitting unavailable record");
            omitted += 1;
            continue;
        }
        let bytes = match record.read_content() {
            Ok(b) => b,
            Err(e) => {
                warn!(path = %record.original_path, error = %e, "omitting unreadable record");
                omitted += 1;
                continue;
            }
        };
        let entry = policy::resolve(&record.normalized_path, &taken, opts.collision)?;
        zip.start_file(entry.clone(), file_opts)?;
        zip.write_all(&bytes)?;
        taken.insert(entry);
        entries += 1;
    }

    let cursor = zip.finish()?;
    let file_name = batch
        .folder
        .as_ref()
        .map(|f| format!("{}.zip", f.folder_name))
        .unwrap_or_else(|| "normalized.zip".to_owned());

    Ok(ArchiveOutput {
        file_name,
        bytes: cursor.into_inner(),
        entries,
        omitted,
    })
}
