//! Inline `#tag` detection in note bodies

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::frontmatter::strip_frontmatter;

lazy_static! {
    static ref INLINE_TAG_RE: Regex = Regex::new(r"(?:^|\s)(#[\p{L}\p{N}_/\-]+)").unwrap();
    static ref FENCE_RE: Regex = Regex::new(r"^\s*(```|~~~)").unwrap();
}

/// Find inline tags in markdown content, markers included (`#todo`).
///
/// Frontmatter and fenced code blocks are skipped. Purely numeric tags
/// such as `#123` are not tags.
pub fn find_inline_tags(content: &str) -> Vec<String> {
    let body = strip_frontmatter(content);
    let mut tags = Vec::new();
    let mut in_fence = false;

    for line in body.lines() {
        if FENCE_RE.is_match(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        for caps in INLINE_TAG_RE.captures_iter(line) {
            let tag = &caps[1];
            if tag[1..].chars().any(|c| !c.is_ascii_digit()) {
                tags.push(tag.to_string());
            }
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_body_tags() {
        let content = "Some text #alpha and #beta/child.\n#gamma-1 starts a line";
        assert_eq!(
            find_inline_tags(content),
            vec!["#alpha", "#beta/child", "#gamma-1"]
        );
    }

    #[test]
    fn test_ignores_headings_numbers_and_anchors() {
        let content = "# Heading\n## Sub\nIssue #123 and page#anchor";
        assert!(find_inline_tags(content).is_empty());
    }

    #[test]
    fn test_skips_frontmatter_and_code() {
        let content = r##"---
tags: [front]
note: "#notatag"
---
Body #real

```
#code
```
"##;
        assert_eq!(find_inline_tags(content), vec!["#real"]);
    }
}
