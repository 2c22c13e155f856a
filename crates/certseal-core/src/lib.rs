//! Certseal Core
//!
//! Keeps hierarchical configuration data sealed at rest with an RSA key pair,
//! while still letting a lookup merge values drawn from many sealed sources.
//!
//! - `envelope`: the chunked envelope cipher and sealed-file operations
//! - `resolver`: first / array / hash lookups across precedence-ordered sources
//! - `config`: the YAML settings file and key file locations
//! - `logging`: the logger handed to components that report progress
//!
//! ```rust,ignore
//! use certseal_core::envelope::{seal_bytes, open_bytes, PrivateKeyMaterial};
//!
//! let private_key = PrivateKeyMaterial::load("/etc/puppetlabs/puppet/ssl/private_keys/node.pem")?;
//! let sealed = seal_bytes(b"ntp: pool.ntp.org\n", &private_key.public_half())?;
//! assert_eq!(open_bytes(&sealed, &private_key)?, b"ntp: pool.ntp.org\n");
//! ```

pub mod config;
pub mod envelope;
pub mod logging;
pub mod resolver;

// Re-export commonly used types
pub use envelope::{
    open, open_bytes, open_file, seal, seal_bytes, seal_file, CipherError, CipherResult,
    DecryptOptions, Opened, PrivateKeyMaterial, PublicKeyMaterial, SealedDocument,
    MAX_CHUNK_BYTES,
};

pub use resolver::{
    Answer, DataSource, FileSourceProvider, HierarchicalResolver, LookupError, LookupResult,
    MemorySourceProvider, ResolutionMode, Scope, SourceError, SourceProvider,
};

pub use config::{ConfigError, ConfigFile, KeyLocator};

pub use logging::{ConsoleLogger, Logger, MemoryLogger, NoOpLogger, SharedLogger};
