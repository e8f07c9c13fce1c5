use thiserror::Error;

#[derive(Error, Debug)]
pub enum NfcError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Normalized name collision: {0}")]
    NameCollision(String),

    #[error("Unicode normalization unavailable: {0}")]
    NormalizationUnsupported(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, NfcError>;
