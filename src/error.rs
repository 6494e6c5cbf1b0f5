//! Error types for hydrolayer library

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for layer decoding
#[derive(Debug, Error)]
pub enum LayerError {
    /// File name does not belong to any known dataset
    #[error("Unsupported layer file: {0:?}")]
    UnsupportedFormat(String),

    /// The file could not be opened, or failed before any shape was read
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path has no usable base file name
    #[error("Invalid layer path: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// Result type alias for hydrolayer operations
pub type Result<T> = std::result::Result<T, LayerError>;

impl LayerError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LayerError::Io {
            path: path.into(),
            source,
        }
    }
}
