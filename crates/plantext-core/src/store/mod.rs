//! Byte-store collaborators for persisted documents.
//!
//! The persistence mapper treats storage as an opaque, name-keyed byte store
//! with four operations. [`FsStore`] is the real implementation (one file
//! per project, whole-file replacement writes); [`MemStore`] backs tests and
//! embedding scenarios.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::config::EngineConfig;
use crate::error::{IoResultExt, Result};

/// Name-keyed byte storage consumed by the persistence mapper.
pub trait ByteStore {
    /// True when an entry exists under the name.
    fn exists(&self, name: &str) -> bool;

    /// Reads the entry's bytes.
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Replaces the entry wholesale. There is no append or patch form, and
    /// no partial-write recovery.
    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<()>;

    /// Lists the names of all entries.
    fn list(&self) -> Result<Vec<String>>;
}

/// File-backed store: one `<name>.json` per project under a directory.
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    /// Creates the store, making the storage directory if needed.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        fs::create_dir_all(&config.storage_dir).fs_context(&config.storage_dir)?;
        Ok(Self {
            dir: config.storage_dir.clone(),
        })
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_name(name)))
    }
}

/// Maps a project name to a safe file stem. Path separators and other
/// unfriendly characters become underscores.
fn sanitize_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_' | ' ' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}

impl ByteStore for FsStore {
    fn exists(&self, name: &str) -> bool {
        self.entry_path(name).is_file()
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.entry_path(name);
        debug!("reading project entry {}", path.display());
        fs::read(&path).fs_context(&path)
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.entry_path(name);
        debug!("writing project entry {}", path.display());
        fs::write(&path, bytes).fs_context(&path)
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let entries = fs::read_dir(&self.dir).fs_context(&self.dir)?;
        for entry in entries {
            let entry = entry.fs_context(&self.dir)?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entry directly, bypassing the persistence mapper. Useful
    /// for staging legacy or corrupt content in tests.
    pub fn seed(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(name.into(), bytes.into());
    }
}

impl ByteStore for MemStore {
    fn exists(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        Ok(self.entries.get(name).cloned().unwrap_or_default())
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.entries.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}
