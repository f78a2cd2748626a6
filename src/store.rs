//! Key-value persistence for session snapshots, the score ledger and player
//! details.
//!
//! Stores deal in opaque string blobs; [`TypedStore`] layers JSON on top and
//! degrades corrupt blobs to "absent".

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::StoreError;

pub const BOARD_KEY: &str = "board";
pub const SCOREBOARD_KEY: &str = "scoreboard";
pub const PLAYERS_KEY: &str = "playersDetails";

/// Abstract get/set of named blobs.
pub trait PersistenceAdapter {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, blob: String) -> Result<(), StoreError>;
    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// JSON load/save for any `PersistenceAdapter`.
pub trait TypedStore: PersistenceAdapter {
    /// Decode the blob under `key`. Missing and unparseable blobs both come
    /// back as `None`.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let blob = self.get(key)?;
        match serde_json::from_str(&blob) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "discarding unparseable blob");
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let blob = serde_json::to_string(value)?;
        self.set(key, blob)
    }
}

impl<S: PersistenceAdapter + ?Sized> TypedStore for S {}

/// Blobs held in memory for the life of the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceAdapter for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.blobs.get(key).cloned()
    }

    fn set(&mut self, key: &str, blob: String) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), blob);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl PersistenceAdapter for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(blob) => Some(blob),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read blob");
                None
            }
        }
    }

    fn set(&mut self, key: &str, blob: String) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));

        // Write then rename so readers never see a partial blob.
        fs::write(&tmp, blob).map_err(|e| StoreError::Write {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::Write { path, source: e })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Remove { path, source: e }),
        }
    }
}
