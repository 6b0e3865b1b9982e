//! Error types for configuration loading and tooling
//!
//! Parsing itself never fails; malformed CSS is reported inside the tree as
//! discarded fragments. These errors cover everything around the parser:
//! reading files, loading configuration, serializing output.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShadyCssError {
    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Tree or configuration could not be serialized
    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Config,
    Serialization,
    Internal,
}

impl ShadyCssError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShadyCssError::IoError { .. } => ErrorKind::Io,
            ShadyCssError::ConfigError { .. } => ErrorKind::Config,
            ShadyCssError::SerializationError { .. } => ErrorKind::Serialization,
            ShadyCssError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error only affects a single input (processing can continue)
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Io | ErrorKind::Serialization)
    }

    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn serialization_error(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ShadyCssError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for ShadyCssError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization_error(err.to_string())
    }
}

impl From<serde_yaml::Error> for ShadyCssError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::serialization_error(err.to_string())
    }
}
