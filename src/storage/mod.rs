//! Synchronous string key-value persistence for swipe state.
//!
//! The deck controller only ever sees [`KeyValueStore`]; the binary wires a
//! [`FileStore`] under the app directory while tests use [`MemoryStore`].

use std::path::PathBuf;

use thiserror::Error;

mod atomic;
mod file;
mod memory;

pub(crate) use atomic::atomic_write;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by persistent store backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read the backing file.
    #[error("Failed to read store {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The backing file exists but is not a JSON object of strings.
    #[error("Store {path} is not a valid key-value document: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Failed to serialize the entries.
    #[error("Failed to encode store {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Failed to write the backing file.
    #[error("Failed to write store {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// String key-value store with synchronous writes.
pub trait KeyValueStore {
    /// Return the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
    /// Store every pair in one write. On error none of the pairs are applied.
    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError>;
    /// Remove every key in one write. On error none of the keys are removed.
    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        (**self).set_many(entries)
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StoreError> {
        (**self).remove_many(keys)
    }
}
