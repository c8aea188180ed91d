//! Infrastructure Storage Layer
//!
//! Local persistence for the dashboard. Everything is built on the
//! [`KeyValueStore`](core_kernel::KeyValueStore) port: whole string values
//! under string keys, the same contract a browser's origin storage offers.
//!
//! # Stores
//!
//! - [`InMemoryKeyValueStore`]: process-lifetime only, for tests and ephemeral runs
//! - [`FileKeyValueStore`]: one file per key inside a directory
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_store::{FileKeyValueStore, KeyValueNoteRepository};
//!
//! let store = Arc::new(FileKeyValueStore::open("./data")?);
//! let notes = NotesStore::open(Arc::new(KeyValueNoteRepository::new(store)), clock);
//! ```

pub mod kv;
pub mod error;
pub mod adapters;

pub use kv::{InMemoryKeyValueStore, FileKeyValueStore};
pub use error::StoreError;
pub use adapters::{KeyValueNoteRepository, NOTES_KEY};
