//! Envelope cipher error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading keys, sealing or opening documents
///
/// Every variant is fatal to the call that produced it; no partial plaintext
/// is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum CipherError {
    /// Key file missing, unreadable or not an RSA key of the expected kind
    #[error("Could not load key from {origin}: {reason}")]
    KeyLoad { origin: String, reason: String },

    /// A chunk could not be encrypted
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// A record could not be decoded or decrypted
    #[error("Decryption failed: {0}")]
    Decryption(String),

    /// The file to seal or open does not exist
    #[error("Could not find file {}", .0.display())]
    InputNotFound(PathBuf),

    /// Sealed input is above the size limit and was not confirmed
    #[error("Refusing to decrypt a {size}-byte file (limit {limit} bytes) without confirmation")]
    LargeFileUnconfirmed { size: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CipherError {
    pub fn key_load(origin: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::KeyLoad {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }

    pub fn encryption(message: impl Into<String>) -> Self {
        Self::Encryption(message.into())
    }

    pub fn decryption(message: impl Into<String>) -> Self {
        Self::Decryption(message.into())
    }
}

pub type CipherResult<T> = Result<T, CipherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CipherError::key_load("/ssl/private_keys/node.pem", "no such file");
        assert!(err.to_string().contains("/ssl/private_keys/node.pem"));
        assert!(err.to_string().contains("no such file"));

        let err = CipherError::LargeFileUnconfirmed { size: 70000, limit: 65536 };
        assert!(err.to_string().contains("70000"));
        assert!(err.to_string().contains("65536"));

        let err = CipherError::InputNotFound(PathBuf::from("/tmp/missing.yaml"));
        assert_eq!(err.to_string(), "Could not find file /tmp/missing.yaml");
    }
}
