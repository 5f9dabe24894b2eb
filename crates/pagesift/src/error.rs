use std::path::PathBuf;

use crate::types::PageIndex;

#[derive(Debug, thiserror::Error)]
pub enum SiftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("File not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Cannot open document {path}: {cause}")]
    Open { path: PathBuf, cause: String },

    #[error("Text extraction failed on page {page}: {cause}")]
    Extraction { page: PageIndex, cause: String },

    #[error("Copying page {page} failed: {cause}")]
    Copy { page: PageIndex, cause: String },

    #[error("Cannot write document {path}: {cause}")]
    Sink { path: PathBuf, cause: String },

    #[error("Print error: {0}")]
    Print(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl SiftError {
    /// Per-page and print failures are reported and skipped; everything else ends the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SiftError::Extraction { .. } | SiftError::Copy { .. } | SiftError::Print(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SiftError>;
