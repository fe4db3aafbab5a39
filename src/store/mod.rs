//! Document storage module
//!
//! Every persisted document is a JSON value addressed by a slash-separated key.
//! The timer engine only needs `load` and `save`; `list` and `delete` round out
//! the capability for directory-shaped collections.

pub mod json_file;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access document '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The document exists but cannot be parsed, or its shape is wrong
    #[error("Document '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize document '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid document key: '{0}'")]
    InvalidKey(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A keyed collection of JSON documents
pub trait DocumentStore: Send + Sync {
    /// Load a document. An absent document is `Ok(None)`, not an error.
    fn load(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Create or overwrite a document
    fn save(&self, key: &str, document: &Value) -> StoreResult<()>;

    /// List the keys of all documents directly under `dir`
    fn list(&self, dir: &str) -> StoreResult<Vec<String>>;

    /// Delete a document, returning whether it existed
    fn delete(&self, key: &str) -> StoreResult<bool>;
}

/// Load a document and deserialize it into `T`
pub fn load_as<T: DeserializeOwned>(store: &dyn DocumentStore, key: &str) -> StoreResult<Option<T>> {
    match store.load(key)? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { key: key.to_string(), source }),
        None => Ok(None),
    }
}

/// Serialize `document` and save it under `key`
pub fn save_as<T: Serialize>(store: &dyn DocumentStore, key: &str, document: &T) -> StoreResult<()> {
    let value = serde_json::to_value(document)
        .map_err(|source| StoreError::Serialize { key: key.to_string(), source })?;
    store.save(key, &value)
}

/// Reject keys that could escape the store root
pub(crate) fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('/')
        && key
            .split('/')
            .all(|part| !part.is_empty() && part != "." && part != ".." && !part.contains('\\'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
