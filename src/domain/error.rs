use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing or validating logging configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot convert value {0:?} to file size. Expected format is (\\d+)[BKM]?")]
    InvalidFileSize(String),

    #[error("Invalid log level: {0:?}. Level names cannot be empty")]
    InvalidLogLevel(String),

    #[error("Invalid max_archive_count: {0}. Must be at least 1")]
    InvalidArchiveCount(u32),

    #[error("File writer file_name cannot be empty")]
    EmptyFileName,

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Errors raised by writers and the rotation policy
#[derive(Error, Debug)]
pub enum LogError {
    #[error("Failed to create a log file at: {}", path.display())]
    FileCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to archive, file does not exist: {}", .0.display())]
    FileNotExist(PathBuf),

    #[error("Failed to archive {} to {}", from.display(), to.display())]
    ArchiveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
