//! In-process document store

use std::{collections::BTreeMap, sync::Mutex};
use serde_json::Value;

use super::{validate_key, DocumentStore, StoreResult};

/// Keeps documents in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn documents(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, Value>> {
        // A panic while holding the lock cannot leave a half-written map behind
        self.documents.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, key: &str) -> StoreResult<Option<Value>> {
        validate_key(key)?;
        Ok(self.documents().get(key).cloned())
    }

    fn save(&self, key: &str, document: &Value) -> StoreResult<()> {
        validate_key(key)?;
        self.documents().insert(key.to_string(), document.clone());
        Ok(())
    }

    fn list(&self, dir: &str) -> StoreResult<Vec<String>> {
        if !dir.is_empty() {
            validate_key(dir)?;
        }

        let keys = self
            .documents()
            .keys()
            .filter(|key| match key.rsplit_once('/') {
                Some((parent, _)) => parent == dir,
                None => dir.is_empty(),
            })
            .cloned()
            .collect();
        Ok(keys)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        Ok(self.documents().remove(key).is_some())
    }
}
