//! String key-value storage the character state is persisted to.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, error, warn};

use crate::error::StoreError;

/// Read side of a key-value store.
pub trait Loader {
    fn load(&self, key: &str) -> Option<String>;
}

/// Write side of a key-value store. Writes cannot fail from the caller's
/// point of view; a store reports its own failures.
pub trait Saver {
    fn store(&mut self, key: &str, value: &str);

    /// Stores several entries as one write where the store supports it.
    fn store_all(&mut self, entries: &[(&str, &str)]) {
        for (key, value) in entries {
            self.store(key, value);
        }
    }
}

impl<T: Loader + ?Sized> Loader for &T {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }
}

impl<T: Loader + ?Sized> Loader for &mut T {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }
}

impl<T: Saver + ?Sized> Saver for &mut T {
    fn store(&mut self, key: &str, value: &str) {
        (**self).store(key, value);
    }

    fn store_all(&mut self, entries: &[(&str, &str)]) {
        (**self).store_all(entries);
    }
}

/// In-memory store, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl Loader for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

impl Saver for MemoryStore {
    fn store(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }
}

/// A JSON object of string values kept in a single file.
///
/// Every write replaces the file through a sibling temp file, so a crash
/// mid-write leaves the previous contents in place. Failed writes are logged
/// and the value stays in memory, so the next successful write carries it
/// to disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: MemoryStore,
}

impl FileStore {
    /// Opens `path`, treating a missing file as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(data) => {
                let map: BTreeMap<String, String> = serde_json::from_str(&data).map_err(
                    |source| StoreError::Corrupt {
                        path: path.clone(),
                        source,
                    },
                )?;
                MemoryStore::from_iter(map)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => MemoryStore::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        debug!(
            target: "companion_core.storage",
            path = %path.display(),
            keys = entries.entries().len(),
            "store opened"
        );
        Ok(Self { path, entries })
    }

    /// Like [`FileStore::open`], but a corrupt file is logged and treated as
    /// empty; the next write replaces it.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        match Self::open(path) {
            Err(StoreError::Corrupt { path, source }) => {
                warn!(
                    target: "companion_core.storage",
                    path = %path.display(),
                    error = %source,
                    "discarding unreadable store"
                );
                Ok(Self {
                    path,
                    entries: MemoryStore::new(),
                })
            }
            other => other,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        self.entries.entries()
    }

    /// Writes every entry to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(io_error)?;
        let data = serde_json::to_string_pretty(self.entries.entries()).map_err(|source| {
            StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;

        let mut file = NamedTempFile::new_in(parent).map_err(io_error)?;
        file.write_all(data.as_bytes()).map_err(io_error)?;
        file.as_file().sync_all().map_err(io_error)?;
        file.persist(&self.path).map_err(|err| io_error(err.error))?;
        Ok(())
    }

    fn flush_logged(&self, keys: &[&str]) {
        if let Err(err) = self.flush() {
            error!(target: "companion_core.storage", ?keys, error = %err, "failed to write store");
        }
    }
}

impl Loader for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.load(key)
    }
}

impl Saver for FileStore {
    fn store(&mut self, key: &str, value: &str) {
        self.entries.store(key, value);
        self.flush_logged(&[key]);
    }

    fn store_all(&mut self, entries: &[(&str, &str)]) {
        self.entries.store_all(entries);
        let keys: Vec<&str> = entries.iter().map(|&(key, _)| key).collect();
        self.flush_logged(&keys);
    }
}
