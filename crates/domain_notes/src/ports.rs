//! Notes persistence port

use core_kernel::{DomainPort, PortError};

use crate::note::Note;

/// Whole-list persistence for notes
///
/// The store hands over the complete list on every mutation; adapters never
/// see partial updates.
pub trait NoteRepository: DomainPort {
    /// Restores the persisted list, newest first
    fn load(&self) -> Result<Vec<Note>, PortError>;

    /// Replaces the persisted list
    fn save(&self, notes: &[Note]) -> Result<(), PortError>;
}
