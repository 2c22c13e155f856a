//! Resolver error types

use thiserror::Error;

use crate::envelope::CipherError;
use crate::logging::LogLevel;

use super::mode::ResolutionMode;

/// Why a single source contributed nothing.
///
/// Never returned from a lookup; the resolver logs it and moves on.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("source {name} unavailable: {reason}")]
    Unavailable { name: String, reason: String },

    #[error("source {name} could not be decrypted: {error}")]
    Decrypt { name: String, error: CipherError },

    #[error("source {name} is not valid YAML: {reason}")]
    Parse { name: String, reason: String },

    #[error("source {name} is empty")]
    Empty { name: String },

    #[error("source {name} holds a {found}, not a mapping")]
    NotAMapping { name: String, found: &'static str },
}

impl SourceError {
    pub fn unavailable(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Missing or empty data is routine; broken data deserves a warning
    pub fn severity(&self) -> LogLevel {
        match self {
            SourceError::Unavailable { .. } | SourceError::Empty { .. } => LogLevel::Debug,
            SourceError::Decrypt { .. }
            | SourceError::Parse { .. }
            | SourceError::NotAMapping { .. } => LogLevel::Warn,
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Errors surfaced to the caller of a lookup
#[derive(Error, Debug)]
pub enum LookupError {
    /// A matched value has the wrong shape for the resolution mode
    #[error("Resolution type is {mode} but '{key}' in source {name} is a {found}")]
    TypeMismatch {
        key: String,
        name: String,
        mode: ResolutionMode,
        found: &'static str,
    },
}

pub type LookupResult<T> = Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        assert_eq!(SourceError::unavailable("common", "missing").severity(), LogLevel::Debug);
        assert_eq!(
            SourceError::Empty { name: "common".into() }.severity(),
            LogLevel::Debug
        );
        let decrypt = SourceError::Decrypt {
            name: "common".into(),
            error: CipherError::decryption("bad padding"),
        };
        assert_eq!(decrypt.severity(), LogLevel::Warn);
        assert!(decrypt.to_string().contains("bad padding"));
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = LookupError::TypeMismatch {
            key: "ntp".into(),
            name: "common".into(),
            mode: ResolutionMode::Hash,
            found: "string",
        };
        assert_eq!(
            err.to_string(),
            "Resolution type is hash but 'ntp' in source common is a string"
        );
    }
}
