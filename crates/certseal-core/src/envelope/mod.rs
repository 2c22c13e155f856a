//! Chunked RSA envelope cipher
//!
//! A sealed document is plain text: one base64 line per RSA-encrypted block,
//! each block holding at most [`MAX_CHUNK_BYTES`] bytes of plaintext. There is
//! no header and no chunk count; record boundaries are line boundaries.
//!
//! ```text
//! plaintext ──split 500B──▶ chunk ──RSA PKCS#1 v1.5──▶ block ──base64──▶ line\n
//! ```
//!
//! - `keys`: PEM key loading, split by direction (encrypt-only / decrypt-only)
//! - `cipher`: `seal` / `open` over in-memory documents
//! - `file`: the sealed-file operations behind the `encrypt`/`decrypt` commands

mod error;
mod keys;
mod cipher;
mod file;

pub use error::{CipherError, CipherResult};
pub use keys::{PrivateKeyMaterial, PublicKeyMaterial, PKCS1_V15_OVERHEAD};
pub use cipher::{
    open, open_bytes, seal, seal_bytes, ChunkRecord, SealedDocument, MAX_CHUNK_BYTES,
};
pub use file::{
    check_sealed_input, open_file, seal_file, sealed_path, DecryptOptions, Opened,
    LARGE_FILE_LIMIT, SEALED_EXTENSION,
};
