//! Frontmatter parsing
//!
//! Parses the YAML block at the top of a markdown note into named attributes.
//! Every attribute is reduced to a string or a list of strings, which is all
//! the rule matcher compares against.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;

lazy_static! {
    static ref FRONTMATTER_RE: Regex = Regex::new(r"(?s)^---\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|$)").unwrap();
}

/// Reserved attribute name holding a note's tags
pub const TAGS_KEY: &str = "tags";

/// Field value types for frontmatter attributes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Get as string reference if it's a String variant
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Exact equality for strings, membership for lists
    pub fn matches(&self, pattern: &str) -> bool {
        match self {
            FieldValue::String(s) => s == pattern,
            FieldValue::List(l) => l.iter().any(|item| item == pattern),
        }
    }

    /// Items of a tag-like value. A comma or space separated string is split.
    pub fn items(&self) -> Vec<&str> {
        match self {
            FieldValue::List(l) => l.iter().map(|s| s.as_str()).collect(),
            FieldValue::String(s) => s
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::Sequence(items) => Some(FieldValue::List(
                items.iter().filter_map(scalar_to_string).collect(),
            )),
            other => scalar_to_string(other).map(FieldValue::String),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

#[derive(Debug, Default, Clone)]
pub struct Frontmatter {
    pub fields: HashMap<String, FieldValue>,
}

impl Frontmatter {
    /// Parse frontmatter from markdown content.
    ///
    /// Returns `None` when the note has no frontmatter block. A block that is
    /// not a YAML mapping yields an empty field set.
    pub fn parse(content: &str) -> Option<Self> {
        let caps = FRONTMATTER_RE.captures(content)?;
        let raw = caps.get(1)?.as_str();

        let fields = match serde_yaml::from_str::<Value>(raw) {
            Ok(Value::Mapping(map)) => map
                .iter()
                .filter_map(|(k, v)| {
                    let key = scalar_to_string(k)?;
                    let value = FieldValue::from_yaml(v)?;
                    Some((key, value))
                })
                .collect(),
            Ok(_) => HashMap::new(),
            Err(e) => {
                tracing::debug!("Unparseable frontmatter: {}", e);
                HashMap::new()
            }
        };

        Some(Self { fields })
    }

    /// Raw tag values
    pub fn tags(&self) -> Vec<&str> {
        self.fields
            .get(TAGS_KEY)
            .map(|v| v.items())
            .unwrap_or_default()
    }

    /// Get any field by key
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Get string field value
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }
}

/// Content with the frontmatter block removed
pub fn strip_frontmatter(content: &str) -> &str {
    match FRONTMATTER_RE.find(content) {
        Some(m) => &content[m.end()..],
        None => content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_frontmatter() {
        let content = r##"---
type: note
status: active
tags: [rust, "#mcp"]
rating: 4
draft: false
---

Content here.
"##;

        let fm = Frontmatter::parse(content).unwrap();
        assert_eq!(fm.get_string("type"), Some("note"));
        assert_eq!(fm.get_string("rating"), Some("4"));
        assert_eq!(fm.get_string("draft"), Some("false"));
        assert_eq!(fm.tags(), vec!["rust", "#mcp"]);
    }

    #[test]
    fn test_block_list_and_string_tags() {
        let block = "---\ntags:\n  - one\n  - two\n---\n";
        assert_eq!(Frontmatter::parse(block).unwrap().tags(), vec!["one", "two"]);

        let inline = "---\ntags: one, two three\n---\n";
        assert_eq!(
            Frontmatter::parse(inline).unwrap().tags(),
            vec!["one", "two", "three"]
        );
    }

    #[test]
    fn test_missing_and_invalid_frontmatter() {
        assert!(Frontmatter::parse("No frontmatter here").is_none());

        let broken = "---\n: : [\n---\nbody";
        let fm = Frontmatter::parse(broken).unwrap();
        assert!(fm.fields.is_empty());
        assert!(fm.tags().is_empty());
    }

    #[test]
    fn test_field_value_matches() {
        assert!(FieldValue::String("draft".into()).matches("draft"));
        assert!(!FieldValue::String("drafts".into()).matches("draft"));

        let list = FieldValue::List(vec!["project-x".into(), "misc".into()]);
        assert!(list.matches("project-x"));
        assert!(!list.matches("project"));
    }

    #[test]
    fn test_strip_frontmatter() {
        let content = "---\na: b\n---\nBody text";
        assert_eq!(strip_frontmatter(content), "Body text");
        assert_eq!(strip_frontmatter("Just body"), "Just body");
    }
}
