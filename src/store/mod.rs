use std::fs;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{AppError, AppResult};

/// Flat-file JSON document store. Each named document is one file holding a
/// whole serialized value; every mutation goes through load-modify-save of
/// the entire document. There is no locking, so concurrent writers are
/// last-writer-wins. The intended deployment is single-operator.
#[derive(Clone, Debug)]
pub struct DocumentStore {
    dir: PathBuf,
}

impl DocumentStore {
    pub fn open(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Load a whole document. A missing file is not an error: the default
    /// document is written out and returned. Unreadable content fails fast
    /// with a storage error naming the file.
    pub fn load<T>(&self, name: &str) -> AppResult<T>
    where
        T: DeserializeOwned + Serialize + Default,
    {
        let path = self.path_for(name);

        if !path.exists() {
            let default = T::default();
            self.save(name, &default)?;
            return Ok(default);
        }

        let raw = fs::read_to_string(&path)
            .map_err(|e| AppError::StorageError(format!("failed to read {}: {}", name, e)))?;

        serde_json::from_str(&raw).map_err(|e| {
            AppError::StorageError(format!(
                "{} contains invalid JSON ({}); refusing to continue",
                name, e
            ))
        })
    }

    /// Overwrite a whole document with pretty-printed JSON.
    pub fn save<T: Serialize>(&self, name: &str, value: &T) -> AppResult<()> {
        let path = self.path_for(name);
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::StorageError(format!("failed to serialize {}: {}", name, e)))?;
        fs::write(&path, json)
            .map_err(|e| AppError::StorageError(format!("failed to write {}: {}", name, e)))?;
        Ok(())
    }
}

pub const USERS_DOCUMENT: &str = "users.json";
pub const SOPS_DOCUMENT: &str = "sops.json";
pub const RESULTS_DOCUMENT: &str = "results.json";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn temp_store() -> (tempfile::TempDir, DocumentStore) {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let store = DocumentStore::open(dir.path()).expect("store should open");
        (dir, store)
    }

    #[test]
    fn missing_document_yields_default_and_creates_file() {
        let (dir, store) = temp_store();

        let doc: BTreeMap<String, u32> = store.load("counts.json").unwrap();
        assert!(doc.is_empty());
        assert!(dir.path().join("counts.json").exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, store) = temp_store();

        let mut doc: BTreeMap<String, u32> = BTreeMap::new();
        doc.insert("ppe".to_string(), 2);
        doc.insert("lockout".to_string(), 1);
        store.save("counts.json", &doc).unwrap();

        let loaded: BTreeMap<String, u32> = store.load("counts.json").unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn corrupt_document_fails_fast() {
        let (dir, store) = temp_store();
        std::fs::write(dir.path().join("users.json"), "{ not json").unwrap();

        let result: AppResult<BTreeMap<String, u32>> = store.load("users.json");
        match result {
            Err(AppError::StorageError(msg)) => assert!(msg.contains("users.json")),
            other => panic!("expected storage error, got {:?}", other.map(|_| ())),
        }
    }
}
