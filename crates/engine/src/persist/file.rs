//! File-backed blob store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{BlobStore, PersistenceError};

/// One pretty-printed JSON file per key under a data directory.
#[derive(Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Open (creating if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Io`] if the directory cannot be
    /// created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| PersistenceError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// The directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn load(&mut self, key: &str) -> Result<Option<Value>, PersistenceError> {
        let raw = match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Io {
                    key: key.to_owned(),
                    source,
                });
            }
        };

        let value = serde_json::from_str(&raw).map_err(|source| PersistenceError::Malformed {
            key: key.to_owned(),
            source,
        })?;
        Ok(Some(value))
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(self.path_for(key), raw).map_err(|source| PersistenceError::Io {
            key: key.to_owned(),
            source,
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }
}
