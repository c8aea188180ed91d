//! Notes store
//!
//! Holds the note list in memory, newest first, and writes the whole list
//! through the [`NoteRepository`] after every successful mutation. A failed
//! write is logged and the in-memory list is kept, so the caller's view stays
//! consistent with what it just did.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Duration;
use tracing::{debug, warn};

use core_kernel::{Clock, NoteId};

use crate::error::NoteError;
use crate::note::Note;
use crate::ports::NoteRepository;

/// CRUD log of notes
pub struct NotesStore {
    repository: Arc<dyn NoteRepository>,
    clock: Arc<dyn Clock>,
    notes: Mutex<Vec<Note>>,
}

impl NotesStore {
    /// Opens the store, restoring whatever the repository holds
    ///
    /// A repository that cannot be read yields an empty store.
    pub fn open(repository: Arc<dyn NoteRepository>, clock: Arc<dyn Clock>) -> Self {
        let notes = match repository.load() {
            Ok(notes) => notes,
            Err(err) => {
                warn!(error = %err, "Could not restore notes, starting empty");
                Vec::new()
            }
        };
        debug!(count = notes.len(), "Notes restored");

        Self {
            repository,
            clock,
            notes: Mutex::new(notes),
        }
    }

    /// All notes, most recently created first
    pub fn list(&self) -> Vec<Note> {
        self.lock().clone()
    }

    pub fn get(&self, id: &NoteId) -> Option<Note> {
        self.lock().iter().find(|n| &n.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Prepends a note stamped with the current time
    ///
    /// Content is stored as given; it is only trimmed to check for blankness.
    pub fn add(&self, content: &str) -> Result<Note, NoteError> {
        if Note::is_blank(content) {
            return Err(NoteError::EmptyContent);
        }

        let mut notes = self.lock();
        let now = self.clock.now();
        let note = Note::new(unique_id(&notes, now), content, now);

        notes.insert(0, note.clone());
        self.persist(&notes);
        Ok(note)
    }

    /// Replaces a note's content and stamps it with the current time
    ///
    /// The note keeps its id and position.
    pub fn update(&self, id: &NoteId, content: &str) -> Result<Note, NoteError> {
        if Note::is_blank(content) {
            return Err(NoteError::EmptyContent);
        }

        let mut notes = self.lock();
        let now = self.clock.now();
        let note = notes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| NoteError::NotFound(id.clone()))?;

        note.content = content.to_string();
        note.date = now;
        let updated = note.clone();

        self.persist(&notes);
        Ok(updated)
    }

    /// Removes a note, returning it
    pub fn delete(&self, id: &NoteId) -> Result<Note, NoteError> {
        let mut notes = self.lock();
        let index = notes
            .iter()
            .position(|n| &n.id == id)
            .ok_or_else(|| NoteError::NotFound(id.clone()))?;

        let removed = notes.remove(index);
        self.persist(&notes);
        Ok(removed)
    }

    fn persist(&self, notes: &[Note]) {
        if let Err(err) = self.repository.save(notes) {
            warn!(error = %err, count = notes.len(), "Failed to persist notes");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Note>> {
        self.notes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Timestamp id for `now`, moved forward a millisecond at a time until free
fn unique_id(notes: &[Note], now: chrono::DateTime<chrono::Utc>) -> NoteId {
    let mut at = now;
    loop {
        let candidate = NoteId::from_timestamp(at);
        if !notes.iter().any(|n| n.id == candidate) {
            return candidate;
        }
        at += Duration::milliseconds(1);
    }
}
