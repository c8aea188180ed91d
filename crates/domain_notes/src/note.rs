//! Note entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::NoteId;

/// A free-text annotation
///
/// Serialized as `{ "id", "content", "date" }` with `date` in ISO-8601.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    /// Creation time, or the time of the last edit
    pub date: DateTime<Utc>,
}

impl Note {
    pub fn new(id: NoteId, content: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id,
            content: content.into(),
            date,
        }
    }

    /// Whether content is blank once surrounding whitespace is removed
    pub fn is_blank(content: &str) -> bool {
        content.trim().is_empty()
    }
}
