//! Domain Adapters
//!
//! Implementations of domain ports on top of a
//! [`KeyValueStore`](core_kernel::KeyValueStore).

pub mod notes;

pub use notes::{KeyValueNoteRepository, NOTES_KEY};
