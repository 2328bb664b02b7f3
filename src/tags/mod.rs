//! Tag handling
//!
//! # Components
//!
//! - `extractor`: normalization and merging of tags from both sources
//! - `inline`: `#tag` markers found in note bodies

pub mod extractor;
pub mod inline;

pub use extractor::{extract_tags, join_tags, Tag, TagSet, TAG_MARKER};
pub use inline::find_inline_tags;
