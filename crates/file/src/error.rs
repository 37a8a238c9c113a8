//! Error types for the chunk reader.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening or reading a file in chunks.
#[derive(Error, Debug)]
pub enum ChunkReaderError {
    /// The target path does not exist.
    #[error("File is not found [{}]", path.display())]
    NotFound { path: PathBuf },

    /// `read` was called after the current pass reached the closed state.
    #[error("Entire bytes in file has been read [{}]", path.display())]
    AlreadyClosed { path: PathBuf },

    /// The target path exists but cannot be read as a regular file.
    #[error("Not a regular file [{}]", path.display())]
    NotAFile { path: PathBuf },

    #[error("Buffer size must be positive, got {0}")]
    InvalidBufferSize(usize),

    #[error("Unsupported buffer encoding: {0}")]
    UnsupportedEncoding(String),

    /// IO error from the underlying file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChunkReaderError {
    /// Whether this error signals lifecycle misuse rather than a storage failure.
    pub fn is_already_closed(&self) -> bool {
        matches!(self, ChunkReaderError::AlreadyClosed { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ChunkReaderError::NotFound { .. })
    }
}

/// Result type alias for chunk reader operations.
pub type Result<T> = std::result::Result<T, ChunkReaderError>;
