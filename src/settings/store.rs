// ABOUTME: String key-value stores backing persisted settings
// ABOUTME: In-memory store for tests and embedding; JSON-file store for the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dreamband Contributors

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dreamband_core::errors::{AppError, AppResult};
use tracing::debug;

/// Flat string-to-string store
pub trait KeyValueStore {
    /// Value stored under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written
    fn set(&mut self, key: &str, value: String) -> AppResult<()>;

    /// Delete `key`; deleting a missing key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written
    fn remove(&mut self, key: &str) -> AppResult<()>;
}

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> AppResult<()> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted as one JSON object in a file
///
/// The file is re-read on every access and replaced atomically on every
/// write, so several processes sharing it see each other's last write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by `path`; the file is created on first write
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> AppResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|e| {
                AppError::storage(format!("corrupt store file {}", self.path.display()))
                    .with_source(e)
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(AppError::storage(format!(
                "cannot read store file {}",
                self.path.display()
            ))
            .with_source(e)),
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::storage(format!("cannot create {}", parent.display())).with_source(e)
            })?;
        }
        let body = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body).map_err(|e| {
            AppError::storage(format!("cannot write {}", tmp.display())).with_source(e)
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            AppError::storage(format!("cannot replace {}", self.path.display())).with_source(e)
        })?;
        debug!(path = %self.path.display(), keys = entries.len(), "Store file written");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> AppResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value);
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}
