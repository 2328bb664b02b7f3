use std::cell::RefCell;
use std::collections::HashSet;

use super::NoteStore;
use crate::core::note::NoteContent;
use crate::core::paths::check_relative;
use crate::error::{ReadError, RelocationError};

/// Wraps a store so that moves are only planned, never performed.
///
/// Reads go to the inner store. A planned move still fails when the
/// destination exists or was already claimed by an earlier planned move,
/// unless an earlier planned move takes the existing note away.
pub struct DryRunStore<S> {
    inner: S,
    planned: RefCell<Vec<(String, String)>>,
    claimed: RefCell<HashSet<String>>,
    vacated: RefCell<HashSet<String>>,
}

impl<S: NoteStore> DryRunStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            planned: RefCell::new(Vec::new()),
            claimed: RefCell::new(HashSet::new()),
            vacated: RefCell::new(HashSet::new()),
        }
    }

    /// Planned `(source, destination)` pairs in order
    pub fn planned(&self) -> Vec<(String, String)> {
        self.planned.borrow().clone()
    }
}

impl<S: NoteStore> NoteStore for DryRunStore<S> {
    fn read_note(&self, path: &str) -> Result<NoteContent, ReadError> {
        if self.vacated.borrow().contains(path) && !self.claimed.borrow().contains(path) {
            return Err(ReadError::NotFound(path.to_string()));
        }
        self.inner.read_note(path)
    }

    fn move_note(&self, source: &str, destination: &str) -> Result<(), RelocationError> {
        check_relative(destination).map_err(RelocationError::InvalidPath)?;

        if self.claimed.borrow().contains(destination) {
            return Err(RelocationError::DestinationConflict(destination.to_string()));
        }
        let vacated = self.vacated.borrow().contains(destination);
        match self.inner.read_note(destination) {
            Ok(_) if vacated => {}
            Ok(_) => {
                return Err(RelocationError::DestinationConflict(
                    destination.to_string(),
                ))
            }
            Err(ReadError::NotFound(_)) => {}
            Err(ReadError::InvalidPath(reason)) => return Err(RelocationError::InvalidPath(reason)),
            Err(ReadError::Io(e)) => return Err(RelocationError::Io(e)),
        }

        self.claimed.borrow_mut().insert(destination.to_string());
        self.claimed.borrow_mut().remove(source);
        self.vacated.borrow_mut().insert(source.to_string());
        self.planned
            .borrow_mut()
            .push((source.to_string(), destination.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organizer::organize_all;
    use crate::rules::{Rule, RuleSet};
    use crate::store::MemStore;

    #[test]
    fn test_plans_without_moving() {
        let mem = MemStore::new();
        mem.insert("a.md", "a");

        let dry = DryRunStore::new(&mem);
        dry.move_note("a.md", "Done/a.md").unwrap();

        assert!(mem.contains("a.md"));
        assert_eq!(
            dry.planned(),
            vec![("a.md".to_string(), "Done/a.md".to_string())]
        );
    }

    #[test]
    fn test_detects_planned_collisions() {
        let mem = MemStore::new();
        mem.insert("inbox/a.md", "1");
        mem.insert("other/a.md", "2");
        mem.insert("Done/b.md", "3");

        let dry = DryRunStore::new(&mem);
        dry.move_note("inbox/a.md", "Done/a.md").unwrap();
        assert!(matches!(
            dry.move_note("other/a.md", "Done/a.md"),
            Err(RelocationError::DestinationConflict(_))
        ));
        assert!(matches!(
            dry.move_note("b.md", "Done/b.md"),
            Err(RelocationError::DestinationConflict(_))
        ));
    }

    #[test]
    fn test_vacated_destination_is_free() {
        let mem = MemStore::new();
        mem.insert("Done/a.md", "old");
        mem.insert("inbox/a.md", "new");

        let rules = RuleSet::new(vec![
            Rule::new("Done/", "Archive"),
            Rule::new("inbox/", "Done"),
        ]);
        let dry = DryRunStore::new(&mem);
        let report = organize_all(["Done/a.md", "inbox/a.md"], &dry, &rules);

        assert!(report.is_clean());
        assert_eq!(report.summary().relocated, 2);
        assert_eq!(
            dry.planned(),
            vec![
                ("Done/a.md".to_string(), "Archive/a.md".to_string()),
                ("inbox/a.md".to_string(), "Done/a.md".to_string()),
            ]
        );
        assert!(matches!(
            dry.read_note("inbox/a.md"),
            Err(ReadError::NotFound(_))
        ));
        assert!(mem.contains("inbox/a.md"));
    }
}
