//! Integration tests for infra_store

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{TimeZone, Utc};

use core_kernel::{KeyValueStore, NoteId, PortError};
use domain_notes::{Note, NoteRepository};
use infra_store::{FileKeyValueStore, KeyValueNoteRepository, NOTES_KEY};

/// Fresh directory under the system temp dir, removed on drop
struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("infra-store-{}", uuid::Uuid::new_v4()));
        Self(path)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

// ============================================================================
// File store
// ============================================================================

mod file_store_tests {
    use super::*;

    #[test]
    fn test_open_creates_directory() {
        let dir = TempDir::new();
        let store = FileKeyValueStore::open(dir.0.join("nested")).unwrap();
        assert!(store.root().is_dir());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new();
        FileKeyValueStore::open(&dir.0)
            .unwrap()
            .set("greeting", "hello")
            .unwrap();

        let reopened = FileKeyValueStore::open(&dir.0).unwrap();
        assert_eq!(reopened.get("greeting").unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn test_one_file_per_key() {
        let dir = TempDir::new();
        let store = FileKeyValueStore::open(&dir.0).unwrap();

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();

        assert_eq!(std::fs::read_to_string(dir.0.join("a")).unwrap(), "1");
        assert_eq!(std::fs::read_to_string(dir.0.join("b")).unwrap(), "2");
    }

    #[test]
    fn test_remove_absent_key_succeeds() {
        let dir = TempDir::new();
        let store = FileKeyValueStore::open(&dir.0).unwrap();

        store.remove("never-set").unwrap();
        store.set("k", "v").unwrap();
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_path_traversal_rejected() {
        let dir = TempDir::new();
        let store = FileKeyValueStore::open(&dir.0).unwrap();

        let err = store.set("../outside", "x").unwrap_err();
        assert!(matches!(err, PortError::Storage { .. }));
    }
}

// ============================================================================
// Notes repository on disk
// ============================================================================

mod notes_repository_tests {
    use super::*;

    fn sample_notes() -> Vec<Note> {
        let first = Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 3, 6, 9, 0, 0).unwrap();
        vec![
            Note::new(NoteId::from_timestamp(second), "Rebalance mid caps", second),
            Note::new(NoteId::from_timestamp(first), "Check NAV", first),
        ]
    }

    #[test]
    fn test_notes_persist_across_instances() {
        let dir = TempDir::new();
        let store = Arc::new(FileKeyValueStore::open(&dir.0).unwrap());
        KeyValueNoteRepository::new(store).save(&sample_notes()).unwrap();

        let reopened = Arc::new(FileKeyValueStore::open(&dir.0).unwrap());
        let loaded = KeyValueNoteRepository::new(reopened).load().unwrap();

        assert_eq!(loaded, sample_notes());
        assert!(dir.0.join(NOTES_KEY).is_file());
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let dir = TempDir::new();
        let store = Arc::new(FileKeyValueStore::open(&dir.0).unwrap());
        std::fs::write(dir.0.join(NOTES_KEY), "[{\"id\":").unwrap();

        let repository = KeyValueNoteRepository::new(store);
        assert!(repository.load().unwrap().is_empty());

        repository.save(&sample_notes()).unwrap();
        assert_eq!(repository.load().unwrap(), sample_notes());
    }

    #[test]
    fn test_custom_key() {
        let dir = TempDir::new();
        let store = Arc::new(FileKeyValueStore::open(&dir.0).unwrap());

        KeyValueNoteRepository::with_key(store, "notes-v2")
            .save(&sample_notes())
            .unwrap();

        assert!(dir.0.join("notes-v2").is_file());
        assert!(!dir.0.join(NOTES_KEY).exists());
    }
}
