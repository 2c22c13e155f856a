//! Configuration errors

use std::path::PathBuf;

/// Errors that can occur while loading settings
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not load {}", .0.display())]
    NotFound(PathBuf),

    #[error("Configuration at {} appears to be empty", .0.display())]
    Empty(PathBuf),

    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("No certificate name configured and HOSTNAME is not set")]
    MissingCertName,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
