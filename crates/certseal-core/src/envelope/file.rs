//! Sealed-file operations
//!
//! `seal_file` writes `<input>.sealed` next to the input. `open_file` refuses
//! inputs over [`LARGE_FILE_LIMIT`] unless the caller confirms, so a stray
//! invocation cannot dump a huge document to a terminal.

use std::fs;
use std::path::{Path, PathBuf};

use super::cipher::{open_bytes, seal_bytes};
use super::error::{CipherError, CipherResult};
use super::keys::{PrivateKeyMaterial, PublicKeyMaterial};

/// Suffix appended to the full input file name
pub const SEALED_EXTENSION: &str = "sealed";

/// Sealed inputs above this many bytes need explicit confirmation
pub const LARGE_FILE_LIMIT: u64 = 65536;

/// Options for [`open_file`]
#[derive(Debug, Clone, Default)]
pub struct DecryptOptions {
    /// Allow inputs larger than [`LARGE_FILE_LIMIT`]
    pub confirm_large_file: bool,
    /// Write the plaintext here instead of returning it
    pub output: Option<PathBuf>,
}

impl DecryptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm_large_file(mut self, confirm: bool) -> Self {
        self.confirm_large_file = confirm;
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }
}

/// Result of [`open_file`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opened {
    /// No output path was given; here is the plaintext
    Plaintext(Vec<u8>),
    /// Plaintext was written to this path
    Written(PathBuf),
}

/// `common.yaml` → `common.yaml.sealed`, same directory
pub fn sealed_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".");
    name.push(SEALED_EXTENSION);
    PathBuf::from(name)
}

/// Encrypt a file, writing the sealed sibling. Returns the sealed path.
pub fn seal_file(input: &Path, key: &PublicKeyMaterial) -> CipherResult<PathBuf> {
    if !input.is_file() {
        return Err(CipherError::InputNotFound(input.to_path_buf()));
    }
    let plaintext = fs::read(input)?;
    let sealed = seal_bytes(&plaintext, key)?;

    let output = sealed_path(input);
    fs::write(&output, sealed)?;
    Ok(output)
}

/// Check that a sealed file exists and is within the size limit.
///
/// Returns the file size. Callers run this before loading any key material.
pub fn check_sealed_input(input: &Path, confirm_large_file: bool) -> CipherResult<u64> {
    if !input.is_file() {
        return Err(CipherError::InputNotFound(input.to_path_buf()));
    }
    let size = fs::metadata(input)?.len();
    if size > LARGE_FILE_LIMIT && !confirm_large_file {
        return Err(CipherError::LargeFileUnconfirmed {
            size,
            limit: LARGE_FILE_LIMIT,
        });
    }
    Ok(size)
}

/// Decrypt a sealed file.
///
/// The whole document is decrypted before anything is written, so a failed
/// decryption never leaves a partial output file behind.
pub fn open_file(
    input: &Path,
    key: &PrivateKeyMaterial,
    options: &DecryptOptions,
) -> CipherResult<Opened> {
    check_sealed_input(input, options.confirm_large_file)?;
    let sealed = fs::read(input)?;
    let plaintext = open_bytes(&sealed, key)?;

    match &options.output {
        Some(path) => {
            fs::write(path, &plaintext)?;
            Ok(Opened::Written(path.clone()))
        }
        None => Ok(Opened::Plaintext(plaintext)),
    }
}
