//! Notes domain errors

use thiserror::Error;

use core_kernel::NoteId;

/// Errors raised by note operations
///
/// Both variants leave the store unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NoteError {
    /// Content was empty after trimming whitespace
    #[error("Note content must not be empty")]
    EmptyContent,

    /// No note carries the given id
    #[error("Note not found: {0}")]
    NotFound(NoteId),
}
