//! Error types for the document engine.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all engine operations.
///
/// Note that the project *load* path never surfaces these: decode and shape
/// failures there degrade into [`crate::persist::Notice`] values alongside a
/// valid project. Errors are reserved for save-side I/O and encoding, and
/// for configuration problems.
#[derive(Error, Debug)]
pub enum EngineError {
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
}

impl EngineError {
    /// Creates a file system error for a path.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Creates an input validation error.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Extension trait mapping I/O results into [`EngineError::FileSystem`].
pub trait IoResultExt<T> {
    /// Attach the path that the I/O operation touched.
    fn fs_context(self, path: &std::path::Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: &std::path::Path) -> Result<T> {
        self.map_err(|e| EngineError::file_system(path, e))
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
