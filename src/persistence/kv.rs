//! Key-value storage boundary.
//!
//! Values are opaque strings stored under short keys. [`FileStore`] keeps
//! one file per key inside the data directory; [`MemoryStore`] keeps them
//! in a map shared between clones, for sessions without a reachable data
//! directory and for tests.

use super::files::{atomic_write, read_file};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
    #[error("failed to read `{key}`: {message}")]
    Read { key: String, message: String },
    #[error("failed to write `{key}`: {message}")]
    Write { key: String, message: String },
    #[error("storage unavailable")]
    Unavailable,
}

/// String key-value storage
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Keys become file names, so only plain names are accepted
fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/// File-per-key store rooted at a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        read_file(&path).map_err(|e| StorageError::Read {
            key: key.to_string(),
            message: format!("{e:#}"),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        atomic_write(&path, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            message: format!("{e:#}"),
        })
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    writes: usize,
    unavailable: bool,
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far
    #[cfg(test)]
    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }

    /// Make every subsequent read and write fail (or succeed again)
    #[cfg(test)]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.borrow_mut().unavailable = unavailable;
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let inner = self.inner.borrow();
        if inner.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(inner.values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut inner = self.inner.borrow_mut();
        if inner.unavailable {
            return Err(StorageError::Unavailable);
        }
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}

/// Store chosen at startup: the data directory, or memory when it is unreachable
#[derive(Debug, Clone)]
pub enum Storage {
    File(FileStore),
    Memory(MemoryStore),
}

impl KeyValueStore for Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::File(store) => store.get(key),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::File(store) => store.set(key, value),
            Self::Memory(store) => store.set(key, value),
        }
    }
}
