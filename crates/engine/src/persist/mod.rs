//! Persistence adapter boundary.
//!
//! The engine only needs a namespaced key -> JSON document contract:
//! `load`, `save`, `remove`. Two implementations ship with the crate:
//! [`MemoryBlobStore`] for tests and ephemeral sessions, and
//! [`FileBlobStore`] for one-JSON-file-per-key on disk.
//!
//! Storage failures never corrupt the in-memory snapshot; the
//! marketplace catches [`PersistenceError`] and logs a warning.

pub mod file;
pub mod memory;
pub mod snapshot;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

use serde_json::Value;
use thiserror::Error;

/// Document keys, kept wire-compatible with the legacy client where a
/// counterpart exists.
pub mod keys {
    /// Ordered sequence of user records.
    pub const USERS: &str = "lowkal_users_v1";
    /// The authenticated user record, or null when anonymous.
    pub const CURRENT_USER: &str = "lowkal_current_user_v1";
    /// Ordered sequence of product records.
    pub const PRODUCTS: &str = "lowkal_products_v2";
    /// Ordered sequence of interaction records.
    pub const INTERACTIONS: &str = "lowkal_messages_v1";
    /// Filter / sort / search configuration.
    pub const UI: &str = "lowkal_ui_v2";
}

/// Errors at the storage boundary. Non-fatal by policy.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing store failed.
    #[error("storage i/o failure for {key}: {source}")]
    Io {
        /// The document being accessed.
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored document is not valid JSON.
    #[error("malformed document {key}: {source}")]
    Malformed {
        /// The document being read.
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Encoding a collection for storage failed.
    #[error("encode failure: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A namespaced JSON blob store.
///
/// Implementations are synchronous and single-owner, matching the
/// engine's one-logical-actor concurrency model.
pub trait BlobStore {
    /// Load the document stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backend cannot be read or the
    /// stored bytes are not JSON.
    fn load(&mut self, key: &str) -> Result<Option<Value>, PersistenceError>;

    /// Store `value` under `key`, replacing any previous document.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backend cannot be written.
    fn save(&mut self, key: &str, value: &Value) -> Result<(), PersistenceError>;

    /// Delete the document under `key`. Removing an absent key is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}
