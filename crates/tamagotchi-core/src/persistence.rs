//! Local persistence for the animal collection.
//!
//! The whole collection is stored as one JSON array of animal records under a
//! single key and overwritten on every save. There is no format version and no
//! partial update. Store implementations never fail outward: `load` falls back
//! to an empty collection and `save` reports success as a `bool`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tamagotchi_logic::constants::STORAGE_KEY;
use tamagotchi_logic::Animal;
use thiserror::Error;

/// Where the session keeps its animals between runs.
pub trait AnimalStore {
    /// Everything stored, in insertion order. Empty when nothing is stored or
    /// the storage cannot be read.
    fn load(&self) -> Vec<Animal>;

    /// Overwrite the stored collection. Returns `false` if the write failed.
    fn save(&self, animals: &[Animal]) -> bool;
}

/// Errors that can occur while reading or writing a store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("storage write rejected")]
    Rejected,
}

pub fn encode(animals: &[Animal]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(animals)?)
}

pub fn decode(blob: &str) -> Result<Vec<Animal>, StorageError> {
    Ok(serde_json::from_str(blob)?)
}

/// Key/value directory on disk. The collection for a key lives in
/// `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_key(dir, STORAGE_KEY)
    }

    pub fn with_key(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    /// `Ok(None)` when nothing has been stored under the key yet.
    pub fn read_collection(&self) -> Result<Option<Vec<Animal>>, StorageError> {
        let path = self.path();
        let blob = match fs::read_to_string(&path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        if blob.trim().is_empty() {
            return Ok(None);
        }
        decode(&blob).map(Some)
    }

    pub fn write_collection(&self, animals: &[Animal]) -> Result<(), StorageError> {
        let blob = encode(animals)?;
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        write_file(&tmp, &blob)?;
        fs::rename(&tmp, &path).map_err(|source| StorageError::Io { path, source })
    }
}

fn write_file(path: &Path, blob: &str) -> Result<(), StorageError> {
    fs::write(path, blob).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl AnimalStore for FileStore {
    fn load(&self) -> Vec<Animal> {
        match self.read_collection() {
            Ok(animals) => animals.unwrap_or_default(),
            Err(e) => {
                log::warn!("Ignoring unreadable storage {}: {}", self.path().display(), e);
                Vec::new()
            }
        }
    }

    fn save(&self, animals: &[Animal]) -> bool {
        match self.write_collection(animals) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save {} animals: {}", animals.len(), e);
                false
            }
        }
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    blob: Option<String>,
    fail_writes: bool,
}

/// In-memory store. Clones share the same slot, so a test can keep one clone
/// to inspect what a session saved.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with an already encoded blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.lock() {
            inner.blob = Some(blob.into());
        }
        store
    }

    /// Make every following write fail, as a full quota would.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_writes = fail;
        }
    }

    pub fn blob(&self) -> Option<String> {
        self.inner.lock().ok().and_then(|inner| inner.blob.clone())
    }

    fn write(&self, animals: &[Animal]) -> Result<(), StorageError> {
        let blob = encode(animals)?;
        let mut inner = self.inner.lock().map_err(|_| StorageError::Rejected)?;
        if inner.fail_writes {
            return Err(StorageError::Rejected);
        }
        inner.blob = Some(blob);
        Ok(())
    }
}

impl AnimalStore for MemoryStore {
    fn load(&self) -> Vec<Animal> {
        let Some(blob) = self.blob() else {
            return Vec::new();
        };
        decode(&blob).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable in-memory storage: {}", e);
            Vec::new()
        })
    }

    fn save(&self, animals: &[Animal]) -> bool {
        match self.write(animals) {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save {} animals: {}", animals.len(), e);
                false
            }
        }
    }
}
