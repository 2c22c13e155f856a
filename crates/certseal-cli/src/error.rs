//! CLI Error Types

use certseal_core::{CipherError, ConfigError, LookupError};
use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Settings file missing or invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Key loading, sealing or opening failed
    #[error("{0}")]
    Cipher(#[from] CipherError),

    /// A lookup could not be answered
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The answer could not be rendered in the requested format
    #[error("Could not format answer: {message}")]
    Format { message: String },

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub fn invalid_arg(message: impl Into<String>) -> Self {
        CliError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn format(message: impl std::fmt::Display) -> Self {
        CliError::Format {
            message: message.to_string(),
        }
    }

    /// Get exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 1,
            CliError::InvalidArgument { .. } => 2,
            CliError::Cipher(CipherError::LargeFileUnconfirmed { .. }) => 3,
            CliError::Cipher(CipherError::KeyLoad { .. }) => 4,
            CliError::Cipher(_) => 5,
            CliError::Lookup(_) => 6,
            CliError::Format { .. } => 7,
            CliError::Io(_) => 8,
        }
    }
}
