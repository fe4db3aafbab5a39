//! JSON-file-per-document store

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use serde_json::Value;
use tracing::debug;

use super::{validate_key, DocumentStore, StoreError, StoreResult};

/// Stores each document as `<root>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            key: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StoreError {
    StoreError::Io { key: key.to_string(), source }
}

impl DocumentStore for JsonFileStore {
    fn load(&self, key: &str) -> StoreResult<Option<Value>> {
        let path = self.path_for(key)?;

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(key, e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { key: key.to_string(), source })
    }

    fn save(&self, key: &str, document: &Value) -> StoreResult<()> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| io_error(key, e))?;
        }

        let content = serde_json::to_string_pretty(document)
            .map_err(|source| StoreError::Serialize { key: key.to_string(), source })?;

        // Write next to the target and rename so readers never see a torn file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(|e| io_error(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error(key, e))?;

        debug!("Saved document {} to {}", key, path.display());
        Ok(())
    }

    fn list(&self, dir: &str) -> StoreResult<Vec<String>> {
        let base = if dir.is_empty() {
            self.root.clone()
        } else {
            validate_key(dir)?;
            self.root.join(dir)
        };

        let entries = match fs::read_dir(&base) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(dir, e)),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(dir, e))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else { continue };
            let Some(stem) = name.strip_suffix(".json") else { continue };
            if !entry.path().is_file() {
                continue;
            }

            if dir.is_empty() {
                keys.push(stem.to_string());
            } else {
                keys.push(format!("{}/{}", dir, stem));
            }
        }

        keys.sort();
        Ok(keys)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileStore::open(dir.path().join("userdata")).expect("open store");
        (dir, store)
    }

    #[test]
    fn absent_document_is_not_an_error() {
        let (_dir, store) = temp_store();
        assert!(store.load("timer_active").unwrap().is_none());
    }

    #[test]
    fn save_and_reload_from_disk() {
        let (_dir, store) = temp_store();
        let doc = json!({"active": false});
        store.save("timer_active", &doc).unwrap();

        let reopened = JsonFileStore::open(store.root().to_path_buf()).unwrap();
        assert_eq!(reopened.load("timer_active").unwrap(), Some(doc));
        assert!(!store.root().join("timer_active.json.tmp").exists());
    }

    #[test]
    fn unparsable_document_is_corrupt() {
        let (_dir, store) = temp_store();
        fs::write(store.root().join("timer_active.json"), "{not json").unwrap();

        let err = store.load("timer_active").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[test]
    fn list_returns_sorted_keys_in_directory() {
        let (_dir, store) = temp_store();
        store.save("pages/b", &json!({})).unwrap();
        store.save("pages/a", &json!({})).unwrap();
        store.save("timer_active", &json!({})).unwrap();
        fs::write(store.root().join("pages").join("notes.txt"), "x").unwrap();

        assert_eq!(store.list("pages").unwrap(), vec!["pages/a", "pages/b"]);
        assert_eq!(store.list("").unwrap(), vec!["timer_active"]);
        assert!(store.list("countdowns").unwrap().is_empty());
    }

    #[test]
    fn delete_reports_existence() {
        let (_dir, store) = temp_store();
        store.save("pages/a", &json!({})).unwrap();

        assert!(store.delete("pages/a").unwrap());
        assert!(!store.delete("pages/a").unwrap());
        assert!(store.load("pages/a").unwrap().is_none());
    }

    #[test]
    fn rejects_escaping_keys() {
        let (_dir, store) = temp_store();
        let err = store.load("../outside").unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }
}
