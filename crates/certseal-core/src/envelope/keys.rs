//! RSA key material
//!
//! Keys are split by direction at the type level: a [`PublicKeyMaterial`] can
//! only encrypt and a [`PrivateKeyMaterial`] can only decrypt. Both are
//! immutable once loaded and can be shared read-only across threads.

use std::fs;
use std::path::Path;

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use super::error::{CipherError, CipherResult};

/// Bytes of PKCS#1 v1.5 padding inside every RSA block
pub const PKCS1_V15_OVERHEAD: usize = 11;

const INLINE_ORIGIN: &str = "inline PEM";

/// Encrypt-only half of an RSA key pair
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKeyMaterial {
    key: RsaPublicKey,
}

impl PublicKeyMaterial {
    /// Parse a PEM public key (`PUBLIC KEY` or `RSA PUBLIC KEY`)
    pub fn from_pem(pem: &str) -> CipherResult<Self> {
        Self::parse(pem, INLINE_ORIGIN)
    }

    /// Read and parse a PEM public key file
    pub fn load(path: impl AsRef<Path>) -> CipherResult<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let pem = fs::read_to_string(path).map_err(|e| CipherError::key_load(&origin, e))?;
        Self::parse(&pem, &origin)
    }

    fn parse(pem: &str, origin: &str) -> CipherResult<Self> {
        let key = if pem.contains("BEGIN RSA PUBLIC KEY") {
            RsaPublicKey::from_pkcs1_pem(pem).map_err(|e| CipherError::key_load(origin, e))?
        } else {
            RsaPublicKey::from_public_key_pem(pem).map_err(|e| CipherError::key_load(origin, e))?
        };
        Ok(Self { key })
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        self.key.size() * 8
    }

    /// Largest plaintext a single block can carry
    pub fn max_payload(&self) -> usize {
        self.key.size().saturating_sub(PKCS1_V15_OVERHEAD)
    }

    /// Encrypt one block
    pub(crate) fn encrypt_block(&self, block: &[u8]) -> CipherResult<Vec<u8>> {
        if block.len() > self.max_payload() {
            return Err(CipherError::encryption(format!(
                "chunk of {} bytes exceeds the {}-byte payload limit of a {}-bit key",
                block.len(),
                self.max_payload(),
                self.bits()
            )));
        }
        let mut rng = rand::thread_rng();
        self.key
            .encrypt(&mut rng, Pkcs1v15Encrypt, block)
            .map_err(|e| CipherError::encryption(e.to_string()))
    }
}

impl std::fmt::Debug for PublicKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicKeyMaterial")
            .field("bits", &self.bits())
            .finish()
    }
}

/// Decrypt-only half of an RSA key pair
#[derive(Clone)]
pub struct PrivateKeyMaterial {
    key: RsaPrivateKey,
}

impl PrivateKeyMaterial {
    /// Parse a PEM private key (`RSA PRIVATE KEY` or `PRIVATE KEY`)
    pub fn from_pem(pem: &str) -> CipherResult<Self> {
        Self::parse(pem, INLINE_ORIGIN)
    }

    /// Read and parse a PEM private key file
    pub fn load(path: impl AsRef<Path>) -> CipherResult<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let pem = fs::read_to_string(path).map_err(|e| CipherError::key_load(&origin, e))?;
        Self::parse(&pem, &origin)
    }

    fn parse(pem: &str, origin: &str) -> CipherResult<Self> {
        let key = if pem.contains("BEGIN RSA PRIVATE KEY") {
            RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| CipherError::key_load(origin, e))?
        } else {
            RsaPrivateKey::from_pkcs8_pem(pem).map_err(|e| CipherError::key_load(origin, e))?
        };
        Ok(Self { key })
    }

    /// Wrap an already-parsed key
    pub fn from_rsa(key: RsaPrivateKey) -> Self {
        Self { key }
    }

    /// The matching encrypt-only key
    pub fn public_half(&self) -> PublicKeyMaterial {
        PublicKeyMaterial {
            key: self.key.to_public_key(),
        }
    }

    pub fn bits(&self) -> usize {
        self.key.size() * 8
    }

    /// Decrypt one block
    pub(crate) fn decrypt_block(&self, block: &[u8]) -> CipherResult<Vec<u8>> {
        self.key
            .decrypt(Pkcs1v15Encrypt, block)
            .map_err(|e| CipherError::decryption(e.to_string()))
    }
}

impl std::fmt::Debug for PrivateKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKeyMaterial")
            .field("bits", &self.bits())
            .finish_non_exhaustive()
    }
}
