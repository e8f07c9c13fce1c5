use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// One input file as handed over by the surrounding I/O layer: a leaf
/// name, an optional folder-relative path, a size, and a lazy byte
/// handle. Bytes are never copied before export time.
pub trait RawFile {
    fn name(&self) -> &str;
    /// Folder-relative path including the top-level folder segment;
    /// `None` for flat (non-folder) selections.
    fn relative_path(&self) -> Option<&str>;
    fn size(&self) -> u64;
    /// Cheap availability probe taken at ingest. Export re-checks on
    /// the actual read, so a `true` here is not a promise.
    fn is_available(&self) -> bool {
        true
    }
    fn read(&self) -> io::Result<Vec<u8>>;
}

/// A file on disk.
pub struct FsFile {
    path: PathBuf,
    name: String,
    relative: Option<String>,
    size: u64,
}

impl FsFile {
    /// A single file picked without folder context.
    pub fn flat(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let md = fs::metadata(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            path,
            name,
            relative: None,
            size: md.len(),
        })
    }
}

impl RawFile for FsFile {
    fn name(&self) -> &str {
        &self.name
    }
    fn relative_path(&self) -> Option<&str> {
        self.relative.as_deref()
    }
    fn size(&self) -> u64 {
        self.size
    }
    fn is_available(&self) -> bool {
        fs::metadata(&self.path).is_ok()
    }
    fn read(&self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

/// Enumerate every file under `root` as a folder selection: each entry
/// carries a relative path whose first segment is the folder's own
/// name, the way a browser folder picker reports them. Enumeration is
/// sorted for deterministic batch order.
pub fn collect_folder(root: &Path) -> Result<Vec<FsFile>> {
    let label = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut paths: Vec<PathBuf> = Vec::new();
    for e in WalkDir::new(root).follow_links(false) {
        let e = e.map_err(|e| io::Error::other(e))?;
        if e.file_type().is_file() {
            paths.push(e.path().to_path_buf());
        }
        // (symlinks skipped)
    }
    paths.sort();

    let mut out = Vec::with_capacity(paths.len());
    for p in paths {
        let md = fs::metadata(&p)?;
        let name = p
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut segs = vec![label.clone()];
        if let Ok(suffix) = p.strip_prefix(root) {
            segs.extend(
                suffix
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned()),
            );
        }
        out.push(FsFile {
            path: p,
            name,
            relative: Some(segs.join("/")),
            size: md.len(),
        });
    }
    Ok(out)
}

/// An in-memory file handle. `bytes: None` models a handle whose
/// content cannot be retrieved (the source revoked it, the read failed
/// upstream), which must not abort a batch.
pub struct MemFile {
    name: String,
    relative: Option<String>,
    bytes: Option<Vec<u8>>,
    size: u64,
}

impl MemFile {
    pub fn new(name: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_owned(),
            relative: None,
            size: bytes.len() as u64,
            bytes: Some(bytes),
        }
    }

    pub fn with_path(name: &str, relative: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_owned(),
            relative: Some(relative.to_owned()),
            size: bytes.len() as u64,
            bytes: Some(bytes),
        }
    }

    pub fn unreadable(name: &str, relative: Option<&str>, size: u64) -> Self {
        Self {
            name: name.to_owned(),
            relative: relative.map(str::to_owned),
            bytes: None,
            size,
        }
    }
}

impl RawFile for MemFile {
    fn name(&self) -> &str {
        &self.name
    }
    fn relative_path(&self) -> Option<&str> {
        self.relative.as_deref()
    }
    fn size(&self) -> u64 {
        self.size
    }
    fn is_available(&self) -> bool {
        self.bytes.is_some()
    }
    fn read(&self) -> io::Result<Vec<u8>> {
        self.bytes
            .clone()
            .ok_or_else(|| io::Error::other("content unavailable"))
    }
}
