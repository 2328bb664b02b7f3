//! Rule matcher
//!
//! Walks a [`RuleSet`] in order and returns the first rule whose scope and
//! attribute conditions all hold for a note. Later rules are never consulted
//! once one matches.

use super::{AttributeRule, Rule, RuleSet};
use crate::core::frontmatter::TAGS_KEY;
use crate::core::note::NoteSnapshot;
use crate::tags::{Tag, TagSet};

/// Outcome of evaluating one note against a rule set
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    /// Index and rule of the first match
    pub rule: Option<(usize, &'a Rule)>,
    /// All tags of the note, whether or not anything matched
    pub merged_tags: TagSet,
}

impl<'a> MatchResult<'a> {
    pub fn is_match(&self) -> bool {
        self.rule.is_some()
    }

    pub fn rule_index(&self) -> Option<usize> {
        self.rule.map(|(index, _)| index)
    }
}

/// Find the first rule in `rules` that applies to `note`
pub fn match_note<'a>(note: &NoteSnapshot, rules: &'a RuleSet) -> MatchResult<'a> {
    let merged_tags = note.merged_tags();

    let rule = rules
        .iter()
        .enumerate()
        .find(|(_, rule)| rule_matches(note, &merged_tags, rule));

    MatchResult { rule, merged_tags }
}

fn rule_matches(note: &NoteSnapshot, merged_tags: &TagSet, rule: &Rule) -> bool {
    if !rule.in_scope(&note.path) {
        return false;
    }

    rule.attribute_rules
        .iter()
        .all(|attr| attribute_matches(note, merged_tags, attr))
}

fn attribute_matches(note: &NoteSnapshot, merged_tags: &TagSet, attr: &AttributeRule) -> bool {
    // Tags compare in normalized form, frontmatter and body alike
    if attr.attribute_name == TAGS_KEY {
        return Tag::new(&attr.pattern)
            .map(|wanted| merged_tags.contains(&wanted))
            .unwrap_or(false);
    }

    note.frontmatter
        .get(&attr.attribute_name)
        .map(|value| value.matches(&attr.pattern))
        .unwrap_or(false)
}
