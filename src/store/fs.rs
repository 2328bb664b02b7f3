use std::fs::{self, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::NoteStore;
use crate::core::note::NoteContent;
use crate::core::paths::{check_relative, normalize};
use crate::error::{ReadError, RelocationError};

/// Filesystem-backed store rooted at a vault directory.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, String> {
        check_relative(path)?;
        Ok(self.root.join(normalize(path)))
    }
}

impl NoteStore for FsStore {
    fn read_note(&self, path: &str) -> Result<NoteContent, ReadError> {
        let full = self.resolve(path).map_err(ReadError::InvalidPath)?;

        match fs::read_to_string(&full) {
            Ok(content) => Ok(NoteContent::parse(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ReadError::NotFound(path.to_string())),
            Err(e) => Err(ReadError::Io(e)),
        }
    }

    fn move_note(&self, source: &str, destination: &str) -> Result<(), RelocationError> {
        let from = self.resolve(source).map_err(RelocationError::InvalidPath)?;
        let to = self
            .resolve(destination)
            .map_err(RelocationError::InvalidPath)?;

        if !from.is_file() {
            return Err(RelocationError::SourceMissing(source.to_string()));
        }

        if let Some(parent) = to.parent() {
            if parent.is_file() {
                return Err(RelocationError::InvalidPath(format!(
                    "'{}' is a file, not a folder",
                    parent.display()
                )));
            }
            fs::create_dir_all(parent).map_err(|e| map_io(e, destination))?;
        }

        // Claim the destination name first; `rename` alone would replace a
        // file created after the check.
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&to)
            .map_err(|e| map_io(e, destination))?;

        if let Err(e) = fs::rename(&from, &to) {
            if let Err(cleanup) = fs::remove_file(&to) {
                tracing::warn!("Could not remove placeholder {}: {}", to.display(), cleanup);
            }
            return Err(map_io(e, destination));
        }
        Ok(())
    }
}

fn map_io(err: std::io::Error, path: &str) -> RelocationError {
    match err.kind() {
        ErrorKind::PermissionDenied => RelocationError::PermissionDenied(path.to_string()),
        ErrorKind::AlreadyExists => RelocationError::DestinationConflict(path.to_string()),
        _ => RelocationError::Io(err),
    }
}
