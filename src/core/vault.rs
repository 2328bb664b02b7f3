//! Vault traversal

use std::path::Path;

use walkdir::WalkDir;

fn should_exclude_path(path: &Path) -> bool {
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
    })
}

/// Whether a vault-relative path names a markdown note
pub fn is_note_path(path: &Path) -> bool {
    !should_exclude_path(path) && path.extension().map(|e| e == "md").unwrap_or(false)
}

/// All markdown notes under `root` as sorted vault-relative paths.
/// Hidden directories such as `.obsidian` and `.trash` are skipped, as are
/// entries that cannot be read.
pub fn collect_note_paths(root: &Path) -> Vec<String> {
    let mut paths = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };

        if is_note_path(relative) {
            paths.push(relative_to_string(relative));
        }
    }

    paths.sort();
    paths
}

/// Vault-relative path with `/` separators
pub fn relative_to_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
