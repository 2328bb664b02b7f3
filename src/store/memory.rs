use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};

use super::NoteStore;
use crate::core::note::NoteContent;
use crate::core::paths::check_relative;
use crate::error::{ReadError, RelocationError};

/// In-memory note store for tests and previews.
///
/// Uses `RefCell` for interior mutability since organizing is single-threaded.
#[derive(Default)]
pub struct MemStore {
    notes: RefCell<BTreeMap<String, String>>,
    deny_moves: RefCell<HashSet<String>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: &str, content: &str) {
        self.notes
            .borrow_mut()
            .insert(path.to_string(), content.to_string());
    }

    /// Make every move of `source` fail with `PermissionDenied`
    pub fn deny_move(&self, source: &str) {
        self.deny_moves.borrow_mut().insert(source.to_string());
    }

    pub fn contains(&self, path: &str) -> bool {
        self.notes.borrow().contains_key(path)
    }
}

impl NoteStore for MemStore {
    fn read_note(&self, path: &str) -> Result<NoteContent, ReadError> {
        self.notes
            .borrow()
            .get(path)
            .map(|content| NoteContent::parse(content.clone()))
            .ok_or_else(|| ReadError::NotFound(path.to_string()))
    }

    fn move_note(&self, source: &str, destination: &str) -> Result<(), RelocationError> {
        check_relative(destination).map_err(RelocationError::InvalidPath)?;

        if self.deny_moves.borrow().contains(source) {
            return Err(RelocationError::PermissionDenied(source.to_string()));
        }

        let mut notes = self.notes.borrow_mut();
        if notes.contains_key(destination) {
            return Err(RelocationError::DestinationConflict(destination.to_string()));
        }
        let content = notes
            .remove(source)
            .ok_or_else(|| RelocationError::SourceMissing(source.to_string()))?;
        notes.insert(destination.to_string(), content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_and_conflict() {
        let store = MemStore::new();
        store.insert("a.md", "a");
        store.insert("b.md", "b");

        assert!(matches!(
            store.move_note("a.md", "b.md"),
            Err(RelocationError::DestinationConflict(_))
        ));
        store.move_note("a.md", "Done/a.md").unwrap();
        assert!(!store.contains("a.md"));
        assert!(store.contains("Done/a.md"));
    }

    #[test]
    fn test_denied_move_leaves_note() {
        let store = MemStore::new();
        store.insert("a.md", "a");
        store.deny_move("a.md");

        assert!(matches!(
            store.move_note("a.md", "Done/a.md"),
            Err(RelocationError::PermissionDenied(_))
        ));
        assert!(store.contains("a.md"));
    }
}
