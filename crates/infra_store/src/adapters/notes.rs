//! Key-value backed notes repository
//!
//! Stores the full note list as one JSON array under [`NOTES_KEY`]. Data that
//! is missing or cannot be decoded is read as an empty list; a corrupt value
//! is logged and overwritten by the next save.

use std::sync::Arc;

use tracing::{debug, warn};

use core_kernel::{DomainPort, KeyValueStore, PortError};
use domain_notes::{Note, NoteRepository};

/// Storage key holding the serialized note list
pub const NOTES_KEY: &str = "mf-tracker-notes";

/// [`NoteRepository`] over any key-value store
pub struct KeyValueNoteRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl KeyValueNoteRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, NOTES_KEY)
    }

    /// Uses a custom key instead of [`NOTES_KEY`]
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

impl DomainPort for KeyValueNoteRepository {}

impl NoteRepository for KeyValueNoteRepository {
    fn load(&self) -> Result<Vec<Note>, PortError> {
        let Some(raw) = self.store.get(&self.key)? else {
            debug!(key = %self.key, "No stored notes");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => Ok(notes),
            Err(err) => {
                warn!(key = %self.key, error = %err, "Stored notes are malformed, ignoring");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, notes: &[Note]) -> Result<(), PortError> {
        let raw = serde_json::to_string(notes)?;
        self.store.set(&self.key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::InMemoryKeyValueStore;
    use chrono::{TimeZone, Utc};
    use core_kernel::NoteId;

    fn repository() -> (KeyValueNoteRepository, Arc<InMemoryKeyValueStore>) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        (KeyValueNoteRepository::new(store.clone()), store)
    }

    #[test]
    fn test_absent_is_empty() {
        let (repository, _) = repository();
        assert!(repository.load().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_is_empty() {
        let (repository, store) = repository();
        store.set(NOTES_KEY, "{not json").unwrap();
        assert!(repository.load().unwrap().is_empty());

        store.set(NOTES_KEY, r#"[{"id": 1}]"#).unwrap();
        assert!(repository.load().unwrap().is_empty());
    }

    #[test]
    fn test_saves_json_array() {
        let (repository, store) = repository();
        let at = Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap();
        let notes = vec![Note::new(NoteId::from_timestamp(at), "Check NAV", at)];

        repository.save(&notes).unwrap();

        let raw = store.get(NOTES_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"id":"1709634600000","content":"Check NAV","date":"2024-03-05T10:30:00Z"}]"#
        );
        assert_eq!(repository.load().unwrap(), notes);
    }
}
