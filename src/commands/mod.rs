pub mod init;
pub mod organize;
pub mod rules;
pub mod tags;
#[cfg(feature = "watch")]
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use vault_organizer::core::paths::{get_vault_root, normalize};
use vault_organizer::core::vault::relative_to_string;

/// Vault root from `--vault`, falling back to env var or current directory
pub fn resolve_vault(vault: Option<PathBuf>) -> Result<PathBuf> {
    match vault {
        Some(path) => Ok(path),
        None => get_vault_root().context("Failed to get current directory"),
    }
}

/// Turn a note argument into a vault-relative path.
/// Absolute paths inside the vault are stripped of the vault prefix.
pub fn to_vault_relative(vault: &Path, note: &str) -> String {
    let path = Path::new(note);
    if path.is_absolute() {
        if let Ok(relative) = path.strip_prefix(vault) {
            return relative_to_string(relative);
        }
    }
    normalize(note)
}
