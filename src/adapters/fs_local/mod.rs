// Local filesystem adapter - File system operations via std::fs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsLocalAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FsPort for FsLocalAdapter {
    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<(), DomainError> {
        debug!("Writing {}", path.display());
        fs::write(path, contents).map_err(|e| {
            DomainError::FsFail(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    fn delete_file(&self, path: &Path) -> Result<(), DomainError> {
        debug!("Deleting {}", path.display());
        fs::remove_file(path).map_err(|e| {
            DomainError::FsFail(format!("Failed to delete {}: {}", path.display(), e))
        })
    }
}
