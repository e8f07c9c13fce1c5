use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::warn;

use crate::domain::BatchResult;
use crate::error::Result;
use crate::policy::{self, CollisionPolicy};

/// One independent export unit: the normalized leaf name plus the
/// original bytes.
pub struct ExportEntry {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct ExportSet {
    pub entries: Vec<ExportEntry>,
    pub omitted: usize,
}

/// The per-file fallback for flat batches, or for callers without
/// archive support: every readable record becomes one (name, bytes)
/// unit keyed by its normalized leaf name, offered exactly once, in
/// batch order. Unreadable records are skipped and counted. Pacing
/// between successive units is the caller's business.
pub fn export_each(batch: &BatchResult, collision: CollisionPolicy) -> Result<ExportSet> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut entries = Vec::new();
    let mut omitted = 0usize;

    for record in &batch.records {
        if !record.available {
            warn!(name = %record.original_name, "omitting unavailable record");
            omitted += 1;
            continue;
        }
        let bytes = match record.read_content() {
            Ok(b) => b,
            Err(e) => {
                warn!(name = %record.original_name, error = %e, "omitting unreadable record");
                omitted += 1;
                continue;
            }
        };
        let file_name = policy::resolve(&record.normalized_name, &taken, collision)?;
        taken.insert(file_name.clone());
        entries.push(ExportEntry { file_name, bytes });
    }

    Ok(ExportSet { entries, omitted })
}

/// Write an export set into `dest`, creating it if needed.
pub fn write_to_dir(set: &ExportSet, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    for entry in &set.entries {
        fs::write(dest.join(&entry.file_name), &entry.bytes)?;
    }
    Ok(())
}
