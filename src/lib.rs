//! Rule-based note filing for Obsidian vaults
//!
//! Notes are matched against an ordered [`RuleSet`] using their tags and
//! frontmatter attributes; the first matching rule decides where the note
//! is moved. Storage is reached only through a [`NoteStore`].
//!
//! ```no_run
//! use vault_organizer::{organize_all, Config, FsStore};
//! use vault_organizer::core::vault::collect_note_paths;
//! use std::path::Path;
//!
//! let root = Path::new("/path/to/vault");
//! let config = Config::load(root).unwrap();
//! let store = FsStore::new(root);
//! let report = organize_all(collect_note_paths(root), &store, &config.rules);
//! println!("{:?}", report.summary());
//! ```

pub mod core;
pub mod error;
pub mod organizer;
pub mod rules;
pub mod store;
pub mod tags;

pub use crate::core::config::{Config, ScanMode};
pub use crate::core::note::{NoteContent, NoteSnapshot};
pub use error::{ConfigError, OrganizeError, ReadError, RelocationError};
pub use organizer::{organize, organize_all, BatchReport, BatchSummary, NoteState, OrganizeOutcome};
pub use rules::{match_note, AttributeRule, MatchResult, Rule, RuleSet};
pub use store::{DryRunStore, FsStore, MemStore, NoteStore};
pub use tags::{extract_tags, Tag, TagSet};
