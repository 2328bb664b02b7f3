//! Note storage capabilities
//!
//! The organizer never touches storage itself. It reads and moves notes
//! through a [`NoteStore`], which the host provides.

pub mod dry_run;
pub mod fs;
pub mod memory;

use crate::core::note::NoteContent;
use crate::error::{ReadError, RelocationError};

pub use dry_run::DryRunStore;
pub use fs::FsStore;
pub use memory::MemStore;

/// Abstract interface for note I/O.
///
/// Paths are vault-relative with `/` separators.
pub trait NoteStore {
    /// Read a note with its parsed metadata.
    /// Returns `ReadError::NotFound` if the note no longer exists.
    fn read_note(&self, path: &str) -> Result<NoteContent, ReadError>;

    /// Move a note to `destination`, a full vault-relative file path.
    /// Never overwrites: an occupied destination is `DestinationConflict`.
    fn move_note(&self, source: &str, destination: &str) -> Result<(), RelocationError>;
}

impl<S: NoteStore + ?Sized> NoteStore for &S {
    fn read_note(&self, path: &str) -> Result<NoteContent, ReadError> {
        (**self).read_note(path)
    }

    fn move_note(&self, source: &str, destination: &str) -> Result<(), RelocationError> {
        (**self).move_note(source, destination)
    }
}
