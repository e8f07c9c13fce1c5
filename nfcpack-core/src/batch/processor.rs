use tracing::debug;

use crate::batch::source::RawFile;
use crate::domain::{BatchOrigin, BatchResult, FileRecord, FolderContext};
use crate::normalize::path::normalize_path;
use crate::normalize::segment::normalize;

/// Run every input through path normalization, in input order, calling
/// `on_progress(done, total)` after each record. An empty input is a
/// no-op: the callback is never invoked and an empty batch comes back.
///
/// A byte-read problem on one file never aborts the batch; the record
/// is produced with `available == false` and skipped at export. The
/// returned value owns the whole batch, so a re-submission simply
/// replaces it wholesale.
pub fn process_batch(
    files: Vec<Box<dyn RawFile>>,
    origin: BatchOrigin,
    mut on_progress: impl FnMut(usize, usize),
) -> BatchResult {
    if files.is_empty() {
        return BatchResult::empty(origin);
    }

    let total = files.len();
    let mut records = Vec::with_capacity(total);
    for (i, raw) in files.into_iter().enumerate() {
        records.push(ingest(raw));
        on_progress(i + 1, total);
    }

    let folder = match origin {
        BatchOrigin::Folder => folder_context(&records),
        BatchOrigin::Flat => None,
    };
    debug!(total, folder = ?folder, "batch ingested");

    BatchResult {
        records,
        origin,
        folder,
    }
}

fn ingest(raw: Box<dyn RawFile>) -> FileRecord {
    let original_name = raw.name().to_owned();
    let original_path = raw
        .relative_path()
        .unwrap_or_else(|| raw.name())
        .to_owned();
    let normalized_name = normalize(&original_name);
    let normalized = normalize_path(&original_path);
    let changed = normalized_name != original_name || normalized.changed;
    let available = raw.is_available();
    let size = raw.size();

    FileRecord {
        original_name,
        original_path,
        normalized_name,
        normalized_path: normalized.path,
        changed,
        size,
        available,
        content: raw,
    }
}

/// The archive label for a folder batch: leading segment of the first
/// record's normalized path. A folder batch whose paths carry no
/// separator yields no context and exports like a flat one.
fn folder_context(records: &[FileRecord]) -> Option<FolderContext> {
    let first = records.first()?;
    let (head, _) = first.normalized_path.split_once('/')?;
    Some(FolderContext {
        folder_name: head.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::source::MemFile;

    fn boxed(files: Vec<MemFile>) -> Vec<Box<dyn RawFile>> {
        files
            .into_iter()
            .map(|f| Box::new(f) as Box<dyn RawFile>)
            .collect()
    }

    #[test]
    fn empty_input_is_a_noop() {
        let mut calls = 0usize;
        let batch = process_batch(Vec::new(), BatchOrigin::Flat, |_, _| calls += 1);
        assert!(batch.is_empty());
        assert_eq!(calls, 0);
    }

    #[test]
    fn order_and_length_are_preserved() {
        let files = boxed(vec![
            MemFile::new("one.txt", b"1".to_vec()),
            MemFile::new("two.txt", b"2".to_vec()),
            MemFile::new("three.txt", b"3".to_vec()),
        ]);
        let batch = process_batch(files, BatchOrigin::Flat, |_, _| {});
        let names: Vec<_> = batch
            .records
            .iter()
            .map(|r| r.original_name.as_str())
            .collect();
        assert_eq!(names, ["one.txt", "two.txt", "three.txt"]);
    }

    #[test]
    fn progress_fires_once_per_record_in_order() {
        let files = boxed(vec![
            MemFile::new("a", Vec::new()),
            MemFile::new("b", Vec::new()),
        ]);
        let mut seen = Vec::new();
        process_batch(files, BatchOrigin::Flat, |done, total| {
            seen.push((done, total))
        });
        assert_eq!(seen, [(1, 2), (2, 2)]);
    }

    #[test]
    fn changed_flag_tracks_name_and_path() {
        let files = boxed(vec![
            MemFile::new("cafe\u{0301}.txt", b"x".to_vec()),
            MemFile::new("hello.txt", b"y".to_vec()),
        ]);
        let batch = process_batch(files, BatchOrigin::Flat, |_, _| {});
        let decomposed = &batch.records[0];
        assert_eq!(decomposed.normalized_name, "caf\u{e9}.txt");
        assert!(decomposed.changed);
        let plain = &batch.records[1];
        assert_eq!(plain.normalized_name, "hello.txt");
        assert_eq!(plain.normalized_path, "hello.txt");
        assert!(!plain.changed);
    }

    #[test]
    fn folder_context_uses_normalized_leading_segment() {
        let files = boxed(vec![
            MemFile::with_path("a.txt", "N\u{303}/a.txt", b"a".to_vec()),
            MemFile::with_path("b.txt", "N\u{303}/sub/b.txt", b"b".to_vec()),
        ]);
        let batch = process_batch(files, BatchOrigin::Folder, |_, _| {});
        assert_eq!(batch.folder.as_ref().unwrap().folder_name, "\u{d1}");
        assert_eq!(batch.records[1].normalized_path, "\u{d1}/sub/b.txt");
    }

    #[test]
    fn flat_origin_never_gets_folder_context() {
        let files = boxed(vec![MemFile::with_path(
            "a.txt",
            "dir/a.txt",
            b"a".to_vec(),
        )]);
        let batch = process_batch(files, BatchOrigin::Flat, |_, _| {});
        assert!(batch.folder.is_none());
    }

    #[test]
    fn unreadable_file_still_yields_a_record() {
        let files = boxed(vec![
            MemFile::new("ok.txt", b"ok".to_vec()),
            MemFile::unreadable("gone.txt", None, 9),
            MemFile::new("ok2.txt", b"ok".to_vec()),
        ]);
        let batch = process_batch(files, BatchOrigin::Flat, |_, _| {});
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.unavailable_count(), 1);
        assert!(!batch.records[1].available);
        assert_eq!(batch.records[1].size, 9);
    }
}
