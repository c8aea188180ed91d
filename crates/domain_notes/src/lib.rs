//! Notes Domain
//!
//! An ordered log of free-text annotations kept next to the fund dashboard.
//! Notes never read fund data.
//!
//! # Key Concepts
//!
//! - **Note**: content plus the time it was created or last edited, identified
//!   by its creation timestamp
//! - **Notes store**: the in-memory list, newest first, persisted in full after
//!   every mutation
//! - **Note repository**: the port the store persists through

pub mod note;
pub mod ports;
pub mod store;
pub mod error;

pub use note::Note;
pub use ports::NoteRepository;
pub use store::NotesStore;
pub use error::NoteError;
