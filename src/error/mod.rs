//! Error handling module for sbcut

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for sbcut operations
#[derive(Error, Debug)]
pub enum SbCutError {
    /// Input file not found or not a regular file
    #[error("File {path} does not exist!")]
    InputFileNotFound { path: String },

    /// Configuration could not be loaded or is invalid
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Configuration file is not valid TOML
    #[error("Failed to parse configuration file {path}: {source}")]
    ConfigParseError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Logging could not be initialized
    #[error("Failed to initialize logging: {message}")]
    LoggingError { message: String },

    /// Probe, engine or filesystem failure
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl SbCutError {
    /// Process exit code the CLI reports for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            SbCutError::InputFileNotFound { .. } => 255,
            SbCutError::Domain(DomainError::FileNotFound(_)) => 255,
            _ => 1,
        }
    }
}

/// Result type alias for sbcut operations
pub type SbCutResult<T> = std::result::Result<T, SbCutError>;
