//! Vault path management
//!
//! Handles vault root detection and vault-relative note paths. Note paths are
//! always relative to the vault root and use `/` separators.

use std::path::PathBuf;

/// Environment variable for vault path configuration
pub const VAULT_PATH_ENV: &str = "VAULT_ORGANIZER_PATH";

/// Get vault root path from environment variable or current directory.
/// Priority: VAULT_ORGANIZER_PATH env var > current directory
pub fn get_vault_root() -> std::io::Result<PathBuf> {
    if let Ok(path) = std::env::var(VAULT_PATH_ENV) {
        let vault_path = PathBuf::from(&path);
        if vault_path.exists() {
            return Ok(vault_path);
        }
        tracing::warn!(
            "{} is set to '{}' but path does not exist. Falling back to current directory.",
            VAULT_PATH_ENV,
            path
        );
    }
    std::env::current_dir()
}

/// Canonical form of a vault-relative path: `/` separators, no `./` prefix,
/// no duplicate or trailing slashes.
pub fn normalize(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let trimmed = unified.trim();
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);

    trimmed
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Reason a vault-relative path is unusable, if any
pub fn check_relative(path: &str) -> Result<(), String> {
    if path.trim().is_empty() {
        return Err("path is empty".to_string());
    }
    if path.starts_with('/') || path.starts_with('\\') || path.contains(':') {
        return Err(format!("'{}' is not relative to the vault", path));
    }
    if path.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(format!("'{}' escapes the vault", path));
    }
    Ok(())
}

/// Join a destination folder and a file name
pub fn join(dir: &str, file_name: &str) -> String {
    let dir = normalize(dir);
    if dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", dir, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("./Projects//X/"), "Projects/X");
        assert_eq!(normalize("a\\b\\c.md"), "a/b/c.md");
        assert_eq!(normalize("/"), "");
    }

    #[test]
    fn test_check_relative() {
        assert!(check_relative("Projects/X/note.md").is_ok());
        assert!(check_relative("").is_err());
        assert!(check_relative("/etc/passwd").is_err());
        assert!(check_relative("C:/notes").is_err());
        assert!(check_relative("a/../../b").is_err());
    }

    #[test]
    fn test_join() {
        assert_eq!(join("Projects/X/", "n.md"), "Projects/X/n.md");
        assert_eq!(join("", "n.md"), "n.md");
        assert_eq!(join(".", "n.md"), "n.md");
    }
}
