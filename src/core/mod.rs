//! Vault primitives: configuration, paths, frontmatter and notes

pub mod config;
pub mod frontmatter;
pub mod note;
pub mod paths;
pub mod vault;
