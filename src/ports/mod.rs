// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::EngineCommand;

/// Lazily produced output lines of a running engine process
///
/// The final item is an `Err` when the process exits unsuccessfully; the
/// sequence ends once the exit status has been observed.
pub type OutputLines = Box<dyn Iterator<Item = Result<String, DomainError>>>;

/// Port for media file probing
pub trait ProbePort {
    /// Total container duration in seconds
    fn video_duration(&self, path: &Path) -> Result<f64, DomainError>;

    /// Chapters of the container, `None` when it defines none
    fn video_chapters(&self, path: &Path) -> Result<Option<Vec<Chapter>>, DomainError>;
}

/// Port for running engine commands
pub trait ExecutePort {
    /// Start `command` and stream its standard output line by line
    fn execute(&self, command: &EngineCommand) -> Result<OutputLines, DomainError>;

    /// Run `command` to completion and collect its standard output
    fn capture(&self, command: &EngineCommand) -> Result<String, DomainError> {
        let mut output = String::new();
        for line in self.execute(command)? {
            output.push_str(&line?);
            output.push('\n');
        }
        Ok(output)
    }
}

/// Port for file system operations
pub trait FsPort {
    /// Check if file exists
    fn file_exists(&self, path: &Path) -> bool;

    /// Create or truncate a file with the given contents
    fn write_file(&self, path: &Path, contents: &str) -> Result<(), DomainError>;

    /// Delete file
    fn delete_file(&self, path: &Path) -> Result<(), DomainError>;
}
