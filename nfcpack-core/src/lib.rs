#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod policy;

pub mod normalize {
    pub mod path;
    pub mod segment;
}

pub mod batch {
    pub mod processor;
    pub mod source;
}

pub mod export {
    pub mod archive;
    pub mod single;
}

// Re-exports: stable API surface
pub use batch::processor::process_batch;
pub use domain::{BatchOrigin, BatchResult, FileRecord, FolderContext};
pub use export::archive::{ArchiveOptions, ArchiveOutput, build_archive};
pub use export::single::{ExportSet, export_each};
pub use normalize::path::{NormalizedPath, normalize_path};
pub use normalize::segment::{normalize, self_check};
pub use policy::CollisionPolicy;
