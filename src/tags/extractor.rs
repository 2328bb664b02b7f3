//! Tag extractor - merge frontmatter and inline tags into one normalized set
//!
//! Tags reach a note from two places: the `tags` attribute of the frontmatter
//! block and `#tag` markers in the body. Both are normalized by removing every
//! marker character, so `#a`, `a` and `##a` all become the same tag.

use serde::Serialize;
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Deref;

/// Character that denotes a tag in source text
pub const TAG_MARKER: char = '#';

/// A normalized tag: non-empty, case-sensitive, never contains [`TAG_MARKER`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Normalize a raw tag. Returns `None` when nothing is left after stripping.
    pub fn new(raw: &str) -> Option<Self> {
        let stripped: String = raw.chars().filter(|c| *c != TAG_MARKER).collect();
        if stripped.is_empty() {
            None
        } else {
            Some(Self(stripped))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Tag {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deduplicated tag set. Ordered so reports are stable.
pub type TagSet = BTreeSet<Tag>;

/// Merge raw tags from both sources into one normalized set.
///
/// Empty sources are fine; raw values that are nothing but markers are dropped.
pub fn extract_tags<F, I>(frontmatter_raw: F, inline_raw: I) -> TagSet
where
    F: IntoIterator,
    F::Item: AsRef<str>,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    frontmatter_raw
        .into_iter()
        .map(|t| Tag::new(t.as_ref()))
        .chain(inline_raw.into_iter().map(|t| Tag::new(t.as_ref())))
        .flatten()
        .collect()
}

/// Render a tag set for display, e.g. `Found tags: a, b`
pub fn join_tags(tags: &TagSet) -> String {
    tags.iter().map(Tag::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_strips_every_marker() {
        let tags = extract_tags(["#rust", "##deep", "mid#dle#"], NONE);
        let names: Vec<&str> = tags.iter().map(Tag::as_str).collect();
        assert_eq!(names, vec!["deep", "middle", "rust"]);
        assert!(tags.iter().all(|t| !t.contains(TAG_MARKER)));
    }

    #[test]
    fn test_deduplicates_across_sources() {
        let tags = extract_tags(["#a", "#a"], ["a"]);
        assert_eq!(tags.len(), 1);
        assert!(tags.contains("a"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_tags(["#project/x", "misc"], ["#todo", "#misc"]);
        let second = extract_tags(first.iter(), NONE);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_sources() {
        assert!(extract_tags(NONE, NONE).is_empty());
        assert!(extract_tags(Vec::<String>::new(), ["#", "##"]).is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        let tags = extract_tags(["Rust"], ["#rust"]);
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_join_tags() {
        let tags = extract_tags(["b", "a"], NONE);
        assert_eq!(join_tags(&tags), "a, b");
    }
}
