//! Error types for the organizer core
//!
//! Extraction and matching never fail. Only the store boundary and
//! configuration loading produce errors.

use thiserror::Error;

use crate::rules::RuleViolation;
use crate::tags::TagSet;

/// Failure to read a note from the store.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The note vanished before it could be read.
    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Invalid note path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to move a note to its destination.
#[derive(Error, Debug)]
pub enum RelocationError {
    #[error("Destination already exists: {0}")]
    DestinationConflict(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Source note not found: {0}")]
    SourceMissing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid rules: {}", format_violations(.0))]
    InvalidRules(Vec<RuleViolation>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConfigError {
    /// Indices of the offending rules, if this is a rule validation failure.
    pub fn offending_rules(&self) -> Vec<usize> {
        match self {
            ConfigError::InvalidRules(violations) => {
                let mut indices: Vec<usize> = violations.iter().map(|v| v.index).collect();
                indices.dedup();
                indices
            }
            _ => Vec::new(),
        }
    }
}

fn format_violations(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure to organize one note. Read failures other than a vanished note
/// land here too.
#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error("Failed to read {note_path}: {source}")]
    Read {
        note_path: String,
        #[source]
        source: ReadError,
    },

    #[error("Failed to move {note_path} to {destination}: {source}")]
    Relocation {
        note_path: String,
        rule_index: usize,
        destination: String,
        tags: TagSet,
        #[source]
        source: RelocationError,
    },
}

impl OrganizeError {
    pub fn note_path(&self) -> &str {
        match self {
            OrganizeError::Read { note_path, .. } | OrganizeError::Relocation { note_path, .. } => {
                note_path
            }
        }
    }
}
