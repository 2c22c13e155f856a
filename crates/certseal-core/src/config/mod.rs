//! Settings file and key location
//!
//! - `ConfigFile`: the YAML settings (hierarchy + `certseal` section)
//! - `KeyLocator`: where the public and private key files live

mod error;
mod file;
mod locator;

pub use error::{ConfigError, ConfigResult};
pub use file::{
    ConfigFile, ConfigLevel, SealSettings, DEFAULT_CONFIG_PATH, DEFAULT_DATADIR,
    DEFAULT_HIERARCHY, DEFAULT_PRIVATE_KEY_DIR, DEFAULT_PUBLIC_KEY_DIR, DEFAULT_SSL_DIR,
};
pub use locator::KeyLocator;
