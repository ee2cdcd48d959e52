//! Engine configuration.
//!
//! The only tunable is where project documents live on disk. The default
//! follows the XDG Base Directory specification; embedders can point the
//! engine anywhere with [`EngineConfig::new`].

use std::path::PathBuf;

use crate::error::{EngineError, Result};

/// Configuration for a document engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Directory holding one JSON file per project.
    pub storage_dir: PathBuf,
}

impl EngineConfig {
    /// Creates a configuration with an explicit storage directory.
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
        }
    }

    /// Returns the default configuration following the XDG Base Directory
    /// specification (typically `~/.local/share/plantext/projects`).
    pub fn from_xdg() -> Result<Self> {
        let storage_dir = xdg::BaseDirectories::with_prefix("plantext")
            .create_data_directory("projects")
            .map_err(|e| EngineError::XdgDirectory(e.to_string()))?;
        Ok(Self { storage_dir })
    }
}
