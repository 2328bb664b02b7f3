//! Filing rules
//!
//! A [`Rule`] says "notes under `scan_path` whose attributes match every
//! [`AttributeRule`] belong in `destination_path`". A [`RuleSet`] is the
//! ordered list of rules; earlier rules take priority.

pub mod matcher;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::paths::normalize;

pub use matcher::{match_note, MatchResult};

/// "attribute `attribute_name` must match `pattern`"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRule {
    pub attribute_name: String,
    pub pattern: String,
}

impl AttributeRule {
    pub fn new(attribute_name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            attribute_name: attribute_name.into(),
            pattern: pattern.into(),
        }
    }

    /// Parse `name=pattern`
    pub fn parse(spec: &str) -> Option<Self> {
        let (name, pattern) = spec.split_once('=')?;
        Some(Self::new(name.trim(), pattern.trim()))
    }
}

impl fmt::Display for AttributeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.attribute_name, self.pattern)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Path prefix; empty means the whole vault
    #[serde(default)]
    pub scan_path: String,
    pub destination_path: String,
    #[serde(default)]
    pub attribute_rules: Vec<AttributeRule>,
}

impl Rule {
    pub fn new(scan_path: impl Into<String>, destination_path: impl Into<String>) -> Self {
        Self {
            scan_path: scan_path.into(),
            destination_path: destination_path.into(),
            attribute_rules: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute_name: &str, pattern: &str) -> Self {
        self.attribute_rules
            .push(AttributeRule::new(attribute_name, pattern));
        self
    }

    /// Whether a note path falls under this rule's scan scope.
    ///
    /// The scan path is normalized like note paths are. A trailing separator
    /// limits the scope to that folder; without one it is a plain prefix.
    pub fn in_scope(&self, note_path: &str) -> bool {
        let prefix = normalize(&self.scan_path);
        if prefix.is_empty() {
            return true;
        }
        if self.scan_path.trim_end().ends_with(['/', '\\']) {
            note_path.starts_with(&format!("{}/", prefix))
        } else {
            note_path.starts_with(&prefix)
        }
    }

    fn violations(&self, index: usize) -> Vec<RuleViolation> {
        let mut violations = Vec::new();

        if self.destination_path.trim().is_empty() {
            violations.push(RuleViolation {
                index,
                kind: ViolationKind::EmptyDestination,
            });
        }

        for (position, attr) in self.attribute_rules.iter().enumerate() {
            if attr.attribute_name.trim().is_empty() {
                violations.push(RuleViolation {
                    index,
                    kind: ViolationKind::EmptyAttributeName(position),
                });
            }
        }

        violations
    }
}

/// Ordered rules; index order is evaluation priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Insert at `index`, or append when `index` is past the end
    pub fn insert(&mut self, index: usize, rule: Rule) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
    }

    /// Remove the rule at `index`, returning it if present
    pub fn remove(&mut self, index: usize) -> Option<Rule> {
        if index < self.rules.len() {
            Some(self.rules.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Check every rule, reporting all offending indices at once
    pub fn validate(&self) -> Result<(), Vec<RuleViolation>> {
        let violations: Vec<RuleViolation> = self
            .rules
            .iter()
            .enumerate()
            .flat_map(|(index, rule)| rule.violations(index))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub index: usize,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    EmptyDestination,
    /// Position of the attribute rule within the rule
    EmptyAttributeName(usize),
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::EmptyDestination => {
                write!(f, "rule #{}: destination path is empty", self.index)
            }
            ViolationKind::EmptyAttributeName(position) => write!(
                f,
                "rule #{}: attribute rule {} has an empty name",
                self.index, position
            ),
        }
    }
}
