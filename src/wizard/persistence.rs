//! Persistence channel for inquiry drafts
//!
//! A draft is stored as a JSON snapshot under a fixed key. Reads never
//! fail from the caller's point of view: missing or malformed data is
//! treated as "no draft".

use crate::state::{FormState, InquiryFields, PersistenceMeta, Step};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key under which the wizard keeps its draft
pub const DRAFT_KEY: &str = "fabric-inquiry-draft";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("draft store is unavailable")]
    Unavailable,
}

/// Serialized copy of everything needed to restore the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub fields: InquiryFields,
    pub current_step: Step,
    pub last_saved_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn capture(state: &FormState, saved_at: DateTime<Utc>) -> Self {
        Self {
            fields: state.fields.clone(),
            current_step: state.current_step,
            last_saved_at: Some(saved_at),
        }
    }

    /// Rebuild a fresh form state from this snapshot
    pub fn restore(self) -> FormState {
        FormState {
            fields: self.fields,
            current_step: self.current_step,
            persistence_meta: PersistenceMeta {
                last_saved_at: self.last_saved_at,
                has_unsaved_changes: false,
            },
            ..Default::default()
        }
    }
}

/// Durable key-value storage local to the client
#[cfg_attr(test, mockall::automock)]
pub trait PersistenceChannel: Send {
    /// Stored snapshot, or `None` when absent or unreadable
    fn read(&self, key: &str) -> Option<Snapshot>;

    fn write(&self, key: &str, snapshot: &Snapshot) -> Result<(), PersistenceError>;

    /// Remove the entry; deleting a missing entry is not an error
    fn delete(&self, key: &str) -> Result<(), PersistenceError>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl PersistenceChannel for FileStore {
    fn read(&self, key: &str) -> Option<Snapshot> {
        let path = self.path_for(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                tracing::warn!("Could not read draft {}: {err}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!("Ignoring malformed draft {}: {err}", path.display());
                None
            }
        }
    }

    fn write(&self, key: &str, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| PersistenceError::Io { path, source }
        };

        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;
        let content = serde_json::to_string_pretty(snapshot)?;

        // Write beside the target and rename so a crash never leaves half a draft
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PersistenceError::Io { path, source }),
        }
    }
}

/// In-process store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    #[cfg(test)]
    pub fn insert_raw(&self, key: &str, raw: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), raw.to_string());
        }
    }
}

impl PersistenceChannel for MemoryStore {
    fn read(&self, key: &str) -> Option<Snapshot> {
        let entries = self.entries.lock().ok()?;
        let raw = entries.get(key)?;
        match serde_json::from_str(raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!("Ignoring malformed draft {key}: {err}");
                None
            }
        }
    }

    fn write(&self, key: &str, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(snapshot)?;
        self.entries
            .lock()
            .map_err(|_| PersistenceError::Unavailable)?
            .insert(key.to_string(), raw);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), PersistenceError> {
        self.entries
            .lock()
            .map_err(|_| PersistenceError::Unavailable)?
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample_snapshot() -> Snapshot {
        let mut fields = InquiryFields {
            company_name: "Acme".to_string(),
            ..Default::default()
        };
        fields.toggle_fabric_type("Cotton");
        fields.toggle_fabric_type("Silk");
        Snapshot {
            fields,
            current_step: Step::Two,
            last_saved_at: Some(Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()),
        }
    }

    /// Store in a fresh directory, removed when the guard drops
    fn temp_store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("drafts"));
        (dir, store)
    }

    mod snapshot {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_restore_keeps_fields_step_and_timestamp() {
            let snapshot = sample_snapshot();
            let state = snapshot.clone().restore();
            assert_eq!(state.fields, snapshot.fields);
            assert_eq!(state.current_step, Step::Two);
            assert_eq!(state.persistence_meta.last_saved_at, snapshot.last_saved_at);
            assert!(!state.persistence_meta.has_unsaved_changes);
        }

        #[test]
        fn test_json_round_trip() {
            let snapshot = sample_snapshot();
            let json = serde_json::to_string(&snapshot).unwrap();
            let parsed: Snapshot = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, snapshot);
        }

        #[test]
        fn test_out_of_range_step_is_rejected() {
            let mut value = serde_json::to_value(sample_snapshot()).unwrap();
            value["current_step"] = serde_json::json!(9);
            assert!(serde_json::from_value::<Snapshot>(value).is_err());
        }
    }

    mod memory_store {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_read_missing_is_none() {
            assert!(MemoryStore::new().read(DRAFT_KEY).is_none());
        }

        #[test]
        fn test_write_then_read() {
            let store = MemoryStore::new();
            store.write(DRAFT_KEY, &sample_snapshot()).unwrap();
            assert_eq!(store.read(DRAFT_KEY), Some(sample_snapshot()));
        }

        #[test]
        fn test_clones_share_entries() {
            let store = MemoryStore::new();
            let handle = store.clone();
            store.write(DRAFT_KEY, &sample_snapshot()).unwrap();
            assert!(handle.contains(DRAFT_KEY));
            handle.delete(DRAFT_KEY).unwrap();
            assert!(!store.contains(DRAFT_KEY));
        }

        #[test]
        fn test_malformed_entry_reads_as_none() {
            let store = MemoryStore::new();
            store.insert_raw(DRAFT_KEY, "{ not json");
            assert!(store.read(DRAFT_KEY).is_none());
        }
    }

    mod file_store {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_round_trip_on_disk() {
            let (_dir, store) = temp_store();
            store.write(DRAFT_KEY, &sample_snapshot()).unwrap();
            assert!(store.dir().join("fabric-inquiry-draft.json").exists());
            assert_eq!(store.read(DRAFT_KEY), Some(sample_snapshot()));
        }

        #[test]
        fn test_missing_file_is_none() {
            let (_dir, store) = temp_store();
            assert!(store.read(DRAFT_KEY).is_none());
        }

        #[test]
        fn test_delete_missing_is_ok() {
            let (_dir, store) = temp_store();
            assert!(store.delete(DRAFT_KEY).is_ok());
        }

        #[test]
        fn test_delete_removes_draft() {
            let (_dir, store) = temp_store();
            store.write(DRAFT_KEY, &sample_snapshot()).unwrap();
            store.delete(DRAFT_KEY).unwrap();
            assert!(store.read(DRAFT_KEY).is_none());
        }

        #[test]
        fn test_garbage_file_is_none() {
            let (_dir, store) = temp_store();
            fs::create_dir_all(store.dir()).unwrap();
            fs::write(store.dir().join("fabric-inquiry-draft.json"), "[1, 2").unwrap();
            assert!(store.read(DRAFT_KEY).is_none());
        }

        #[test]
        fn test_no_temp_file_left_behind() {
            let (_dir, store) = temp_store();
            store.write(DRAFT_KEY, &sample_snapshot()).unwrap();
            assert!(!store.dir().join("fabric-inquiry-draft.json.tmp").exists());
        }
    }
}
