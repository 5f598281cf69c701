use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use super::{KeyValueStore, StoreError, atomic_write};

/// Store persisted as a single JSON object of string values.
///
/// The whole document is rewritten on every mutation; entries are few and
/// small, so this stays a cheap synchronous write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = read_entries(&path)?;
        tracing::debug!(
            "Opened swipe state store at {} with {} entries",
            path.display(),
            entries.len()
        );
        Ok(Self { path, entries })
    }

    /// Open the store, falling back to an empty one when the file is unreadable.
    ///
    /// The broken file is left in place until the next write replaces it.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(path.clone()) {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!("{err}; starting with empty swipe state");
                Self {
                    path,
                    entries: BTreeMap::new(),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `edit` to a copy of the entries and write it once.
    ///
    /// The in-memory map only changes when the write succeeds.
    fn commit(
        &mut self,
        edit: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StoreError> {
        let mut next = self.entries.clone();
        edit(&mut next);
        if next == self.entries {
            return Ok(());
        }
        write_entries(&self.path, &next)?;
        self.entries = next;
        Ok(())
    }
}

fn write_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
    let data = serde_json::to_vec_pretty(entries).map_err(|source| StoreError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, &data).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_many(&[(key, value)])
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.remove_many(&[key])
    }

    fn set_many(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        self.commit(|map| {
            for (key, value) in entries {
                map.insert((*key).to_string(), (*value).to_string());
            }
        })
    }

    fn remove_many(&mut self, keys: &[&str]) -> Result<(), StoreError> {
        self.commit(|map| {
            for key in keys {
                map.remove(*key);
            }
        })
    }
}
