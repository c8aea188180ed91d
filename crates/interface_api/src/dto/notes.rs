//! Notes DTOs

use serde::Deserialize;

/// Body of note create and edit requests
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub content: String,
}
