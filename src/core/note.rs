use std::collections::HashMap;

use serde::Serialize;

use super::frontmatter::{FieldValue, Frontmatter, TAGS_KEY};
use crate::tags::{extract_tags, find_inline_tags, TagSet};

/// What a store hands back for one note: its text plus cached metadata.
#[derive(Debug, Clone, Default)]
pub struct NoteContent {
    pub content: String,
    pub frontmatter: HashMap<String, FieldValue>,
    /// Raw inline tags, markers included
    pub inline_tags: Vec<String>,
}

impl NoteContent {
    /// Build from markdown text by parsing frontmatter and inline tags
    pub fn parse(content: String) -> Self {
        let frontmatter = Frontmatter::parse(&content)
            .map(|fm| fm.fields)
            .unwrap_or_default();
        let inline_tags = find_inline_tags(&content);

        Self {
            content,
            frontmatter,
            inline_tags,
        }
    }
}

/// Point-in-time view of one note used for matching.
///
/// Built fresh for every evaluation and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct NoteSnapshot {
    pub path: String,
    pub frontmatter: HashMap<String, FieldValue>,
    pub body_tags: TagSet,
}

impl NoteSnapshot {
    pub fn new(path: impl Into<String>, note: &NoteContent) -> Self {
        Self {
            path: path.into(),
            frontmatter: note.frontmatter.clone(),
            body_tags: extract_tags(std::iter::empty::<&str>(), &note.inline_tags),
        }
    }

    /// Raw tag values from the frontmatter `tags` attribute
    pub fn frontmatter_tags(&self) -> Vec<&str> {
        self.frontmatter
            .get(TAGS_KEY)
            .map(|v| v.items())
            .unwrap_or_default()
    }

    /// Frontmatter and body tags merged into one set
    pub fn merged_tags(&self) -> TagSet {
        extract_tags(self.frontmatter_tags(), &self.body_tags)
    }

    /// File name component of the note path
    pub fn file_name(&self) -> &str {
        file_name(&self.path)
    }
}

pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_note_content() {
        let note = NoteContent::parse("---\ntags: [a]\narea: work\n---\nText #b".to_string());
        assert_eq!(
            note.frontmatter.get("area"),
            Some(&FieldValue::String("work".into()))
        );
        assert_eq!(note.inline_tags, vec!["#b"]);
    }

    #[test]
    fn test_snapshot_merges_tags() {
        let note = NoteContent::parse("---\ntags: [\"#a\", b]\n---\nText #b #c".to_string());
        let snapshot = NoteSnapshot::new("inbox/x.md", &note);

        let merged_tags = snapshot.merged_tags();
        let merged: Vec<&str> = merged_tags.iter().map(|t| t.as_str()).collect();
        assert_eq!(merged, vec!["a", "b", "c"]);
        assert_eq!(snapshot.body_tags.len(), 2);
        assert_eq!(snapshot.file_name(), "x.md");
    }

    #[test]
    fn test_snapshot_without_metadata() {
        let snapshot = NoteSnapshot::new("plain.md", &NoteContent::default());
        assert!(snapshot.merged_tags().is_empty());
        assert_eq!(file_name("a/b/c.md"), "c.md");
    }
}
