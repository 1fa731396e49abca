//! In-memory blob store.

use std::collections::HashMap;

use serde_json::Value;

use super::{BlobStore, PersistenceError};

/// A `HashMap`-backed store for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    documents: HashMap<String, Value>,
}

impl MemoryBlobStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read access, for asserting on persisted documents in tests.
    #[must_use]
    pub fn document(&self, key: &str) -> Option<&Value> {
        self.documents.get(key)
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&mut self, key: &str) -> Result<Option<Value>, PersistenceError> {
        Ok(self.documents.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<(), PersistenceError> {
        self.documents.insert(key.to_owned(), value.clone());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.documents.remove(key);
        Ok(())
    }
}
