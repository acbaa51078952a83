//! Whole-document JSON persistence for named collections.
//!
//! One collection is one `<name>.json` file under the store's root
//! directory. Reads materialize a default document when the file is
//! missing or unparsable; writes overwrite the file in full. A named
//! mutex guards each collection's read-modify-write cycle against
//! in-process interleaving. Nothing guards against other processes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors from the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Store for whole-document JSON collections under one root directory.
#[derive(Debug)]
pub struct DataStore {
    root: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DataStore {
    /// Create a store rooted at the given directory. The directory is
    /// created lazily on first access.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Create a store at the standard location: `CHIYABARI_DATA_DIR` if
    /// set, otherwise `chiyabari/` under the platform data directory.
    pub fn at_default_location() -> Self {
        let root = std::env::var_os("CHIYABARI_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("chiyabari")
            });
        Self::new(root)
    }

    /// Root directory holding the collection documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read a collection, materializing `default` if the document is
    /// missing. An unparsable document is also replaced by `default`;
    /// the discarded content is logged but otherwise unrecoverable.
    pub fn read<T>(&self, name: &str, default: T) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        let lock = self.collection_lock(name);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        self.load(name, default)
    }

    /// Overwrite a collection document in full.
    pub fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let lock = self.collection_lock(name);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        self.persist(name, value)
    }

    /// Run a read-modify-write cycle on a collection under its guard.
    /// If `mutate` fails, the document is not written back.
    pub fn modify<T, R, F>(&self, name: &str, default: T, mutate: F) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T) -> Result<R, StoreError>,
    {
        let lock = self.collection_lock(name);
        let _guard = lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut document = self.load(name, default)?;
        let result = mutate(&mut document)?;
        self.persist(name, &document)?;
        Ok(result)
    }

    /// Named mutex for a collection, created on first use. A poisoned
    /// guard is recovered: the `()` it protects cannot be left invalid.
    fn collection_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(name.to_string()).or_default().clone()
    }

    fn load<T>(&self, name: &str, default: T) -> Result<T, StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        self.ensure_root()?;
        match fs::read_to_string(self.document_path(name)) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(value) => Ok(value),
                Err(e) => {
                    tracing::warn!("Discarding unparsable {}.json: {}", name, e);
                    self.persist(name, &default)?;
                    Ok(default)
                }
            },
            Err(_) => {
                self.persist(name, &default)?;
                Ok(default)
            }
        }
    }

    fn persist<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        self.ensure_root()?;
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::Storage(format!("serialize {}: {}", name, e)))?;
        fs::write(self.document_path(name), json)
            .map_err(|e| StoreError::Storage(format!("write {}.json: {}", name, e)))
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }

    fn ensure_root(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StoreError::Storage(format!("create {}: {}", self.root.display(), e)))
    }
}
