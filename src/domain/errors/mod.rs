// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments or settings provided
    BadArgs(String),
    /// Input file not found
    FileNotFound(String),
    /// Engine output could not be parsed
    ParseFailed(String),
    /// External process could not be started or exited unsuccessfully
    ProcessFailed(String),
    /// Filesystem operation failed
    FsFail(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            DomainError::ParseFailed(msg) => write!(f, "Parse failed: {}", msg),
            DomainError::ProcessFailed(msg) => write!(f, "Process failed: {}", msg),
            DomainError::FsFail(msg) => write!(f, "Filesystem error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
