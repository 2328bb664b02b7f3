//! Organizer - extract, match and relocate notes
//!
//! Each note moves through `Pending -> Extracted -> Matched -> Relocated`, or
//! ends early as `Unmatched` or `RelocationFailed`. Only the terminal states
//! are recorded on an [`OrganizeOutcome`]; the others show up in traces.
//! Nothing is retried; a failed note has to be organized again by the caller.
//!
//! The rule set is borrowed for the whole call, so it cannot change while a
//! batch is in flight.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::core::note::{file_name, NoteSnapshot};
use crate::core::paths::{join, normalize};
use crate::error::{OrganizeError, ReadError};
use crate::rules::{match_note, RuleSet};
use crate::store::NoteStore;
use crate::tags::TagSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteState {
    Pending,
    Extracted,
    Matched,
    Relocated,
    RelocationFailed,
    Unmatched,
}

/// Result of organizing one note
#[derive(Debug, Clone, Serialize)]
pub struct OrganizeOutcome {
    pub note_path: String,
    pub matched_rule_index: Option<usize>,
    pub new_path: Option<String>,
    pub tags: TagSet,
    pub state: NoteState,
}

impl OrganizeOutcome {
    fn unmatched(note_path: String, tags: TagSet) -> Self {
        Self {
            note_path,
            matched_rule_index: None,
            new_path: None,
            tags,
            state: NoteState::Unmatched,
        }
    }

    /// Outcome recorded for a note whose move failed
    pub fn relocation_failed(error: &OrganizeError) -> Option<Self> {
        match error {
            OrganizeError::Relocation {
                note_path,
                rule_index,
                tags,
                ..
            } => Some(Self {
                note_path: note_path.clone(),
                matched_rule_index: Some(*rule_index),
                new_path: None,
                tags: tags.clone(),
                state: NoteState::RelocationFailed,
            }),
            OrganizeError::Read { .. } => None,
        }
    }

    pub fn relocated(&self) -> bool {
        self.state == NoteState::Relocated
    }
}

/// Organize a single note.
///
/// A note that no longer exists is an `Unmatched` outcome, not an error.
/// A failed move is returned as [`OrganizeError::Relocation`].
pub fn organize<S>(note_path: &str, store: &S, rules: &RuleSet) -> Result<OrganizeOutcome, OrganizeError>
where
    S: NoteStore + ?Sized,
{
    let note_path = normalize(note_path);
    tracing::debug!(note = %note_path, state = ?NoteState::Pending, "organizing");

    let content = match store.read_note(&note_path) {
        Ok(content) => content,
        Err(ReadError::NotFound(_)) => {
            tracing::debug!(note = %note_path, "note vanished before read, skipping");
            return Ok(OrganizeOutcome::unmatched(note_path, TagSet::new()));
        }
        Err(source) => return Err(OrganizeError::Read { note_path, source }),
    };

    let snapshot = NoteSnapshot::new(note_path.as_str(), &content);
    let result = match_note(&snapshot, rules);
    tracing::debug!(note = %note_path, state = ?NoteState::Extracted, tags = result.merged_tags.len());

    let Some((rule_index, rule)) = result.rule else {
        return Ok(OrganizeOutcome::unmatched(note_path, result.merged_tags));
    };
    tracing::debug!(note = %note_path, state = ?NoteState::Matched, rule = rule_index);

    let new_path = join(&rule.destination_path, file_name(&note_path));
    if new_path == note_path {
        tracing::debug!(note = %note_path, "already at destination");
    } else if let Err(source) = store.move_note(&note_path, &new_path) {
        tracing::warn!(note = %note_path, destination = %new_path, "relocation failed: {}", source);
        return Err(OrganizeError::Relocation {
            note_path,
            rule_index,
            destination: new_path,
            tags: result.merged_tags,
            source,
        });
    } else {
        tracing::info!(note = %note_path, destination = %new_path, rule = rule_index, "relocated");
    }

    Ok(OrganizeOutcome {
        note_path,
        matched_rule_index: Some(rule_index),
        new_path: Some(new_path),
        tags: result.merged_tags,
        state: NoteState::Relocated,
    })
}

/// Outcomes of a batch run. Failures never stop the batch.
///
/// A failed relocation appears twice: as a `RelocationFailed` outcome and as
/// the error in `failures`. A failed read only appears in `failures`.
#[derive(Debug)]
pub struct BatchReport {
    pub started: DateTime<Local>,
    pub outcomes: Vec<OrganizeOutcome>,
    pub failures: Vec<OrganizeError>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub relocated: usize,
    pub unmatched: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn summary(&self) -> BatchSummary {
        let count = |state: NoteState| self.outcomes.iter().filter(|o| o.state == state).count();
        BatchSummary {
            relocated: count(NoteState::Relocated),
            unmatched: count(NoteState::Unmatched),
            failed: self.failures.len(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Organize each note in order, collecting failures alongside successes.
pub fn organize_all<I, S>(note_paths: I, store: &S, rules: &RuleSet) -> BatchReport
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    S: NoteStore + ?Sized,
{
    let mut report = BatchReport {
        started: Local::now(),
        outcomes: Vec::new(),
        failures: Vec::new(),
    };

    for path in note_paths {
        match organize(path.as_ref(), store, rules) {
            Ok(outcome) => report.outcomes.push(outcome),
            Err(e) => {
                report.outcomes.extend(OrganizeOutcome::relocation_failed(&e));
                report.failures.push(e);
            }
        }
    }

    let summary = report.summary();
    tracing::info!(
        relocated = summary.relocated,
        unmatched = summary.unmatched,
        failed = summary.failed,
        "batch complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelocationError;
    use crate::rules::Rule;
    use crate::store::MemStore;

    fn project_rules() -> RuleSet {
        RuleSet::new(vec![
            Rule::new("", "Projects/X").with_attribute("tags", "project-x"),
            Rule::new("journal/", "Journal"),
        ])
    }

    #[test]
    fn test_organize_relocates_match() {
        let store = MemStore::new();
        store.insert("inbox/plan.md", "---\ntags: [project-x, misc]\n---\n");

        let outcome = organize("inbox/plan.md", &store, &project_rules()).unwrap();
        assert_eq!(outcome.state, NoteState::Relocated);
        assert_eq!(outcome.matched_rule_index, Some(0));
        assert_eq!(outcome.new_path.as_deref(), Some("Projects/X/plan.md"));
        assert_eq!(outcome.tags.len(), 2);
        assert!(store.contains("Projects/X/plan.md"));
        assert!(!store.contains("inbox/plan.md"));
    }

    #[test]
    fn test_organize_unmatched_keeps_note() {
        let store = MemStore::new();
        store.insert("inbox/idea.md", "Loose thought #idea");

        let outcome = organize("inbox/idea.md", &store, &project_rules()).unwrap();
        assert_eq!(outcome.state, NoteState::Unmatched);
        assert!(outcome.matched_rule_index.is_none());
        assert!(outcome.new_path.is_none());
        assert!(outcome.tags.contains("idea"));
        assert!(store.contains("inbox/idea.md"));
    }

    #[test]
    fn test_missing_note_is_not_an_error() {
        let store = MemStore::new();
        let outcome = organize("gone.md", &store, &project_rules()).unwrap();
        assert_eq!(outcome.state, NoteState::Unmatched);
        assert!(outcome.tags.is_empty());
    }

    #[test]
    fn test_relocation_failure_is_surfaced() {
        let store = MemStore::new();
        store.insert("journal/day.md", "entry");
        store.insert("Journal/day.md", "someone else");

        match organize("journal/day.md", &store, &project_rules()) {
            Err(OrganizeError::Relocation {
                rule_index,
                destination,
                source: RelocationError::DestinationConflict(_),
                ..
            }) => {
                assert_eq!(rule_index, 1);
                assert_eq!(destination, "Journal/day.md");
            }
            other => panic!("expected relocation conflict, got {:?}", other),
        }
        assert!(store.contains("journal/day.md"));
    }

    #[test]
    fn test_already_at_destination() {
        let store = MemStore::new();
        store.insert("Projects/X/plan.md", "---\ntags: [project-x]\n---\n");

        let outcome = organize("Projects/X/plan.md", &store, &project_rules()).unwrap();
        assert_eq!(outcome.state, NoteState::Relocated);
        assert_eq!(outcome.new_path.as_deref(), Some("Projects/X/plan.md"));
    }

    #[test]
    fn test_batch_isolates_failures() {
        let store = MemStore::new();
        store.insert("inbox/locked.md", "---\ntags: [project-x]\n---\n");
        store.insert("inbox/free.md", "---\ntags: [project-x]\n---\n");
        store.insert("inbox/other.md", "nothing here");
        store.deny_move("inbox/locked.md");

        let report = organize_all(
            ["inbox/locked.md", "missing.md", "inbox/free.md", "inbox/other.md"],
            &store,
            &project_rules(),
        );

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].note_path(), "inbox/locked.md");
        assert!(report
            .outcomes
            .iter()
            .any(|o| o.note_path == "inbox/free.md" && o.relocated()));
        assert!(store.contains("Projects/X/free.md"));
        assert_eq!(report.outcomes.len(), 4);
        assert!(report
            .outcomes
            .iter()
            .any(|o| o.note_path == "inbox/locked.md" && o.state == NoteState::RelocationFailed));
        assert_eq!(
            report.summary(),
            BatchSummary {
                relocated: 1,
                unmatched: 2,
                failed: 1
            }
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn test_batch_conflicting_destinations() {
        let store = MemStore::new();
        store.insert("a/note.md", "---\ntags: [project-x]\n---\n");
        store.insert("b/note.md", "---\ntags: [project-x]\n---\n");

        let report = organize_all(["a/note.md", "b/note.md"], &store, &project_rules());
        assert_eq!(report.summary().relocated, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(store.contains("b/note.md"));
    }

    #[test]
    fn test_batch_records_relocation_failed_state() {
        let store = MemStore::new();
        store.insert("journal/day.md", "entry");
        store.deny_move("journal/day.md");

        let report = organize_all(["journal/day.md"], &store, &project_rules());

        assert_eq!(report.outcomes.len(), 1);
        let outcome = &report.outcomes[0];
        assert_eq!(outcome.state, NoteState::RelocationFailed);
        assert_eq!(outcome.matched_rule_index, Some(1));
        assert!(outcome.new_path.is_none());
        assert!(!outcome.relocated());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(
            report.summary(),
            BatchSummary {
                relocated: 0,
                unmatched: 0,
                failed: 1
            }
        );
    }
}
