//! YAML settings file
//!
//! The file is shared with the host lookup framework, so unknown keys are
//! ignored and the legacy `:puppetcert` / `:hierarchy` spellings are accepted.
//!
//! ```yaml
//! hierarchy:
//!   - "%{hostname}"
//!   - common
//! certseal:
//!   ssldir: /etc/puppetlabs/puppet/ssl
//!   cert: node.example.com.pem
//!   datadir: /var/lib/hiera
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/puppetlabs/puppet/hiera.yaml";
pub const DEFAULT_SSL_DIR: &str = "/etc/puppetlabs/puppet/ssl";
pub const DEFAULT_PUBLIC_KEY_DIR: &str = "public_keys";
pub const DEFAULT_PRIVATE_KEY_DIR: &str = "private_keys";
pub const DEFAULT_DATADIR: &str = "/var/lib/hiera";
pub const DEFAULT_HIERARCHY: &str = "common";

/// Settings file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Ordered source names, highest precedence first
    #[serde(default, alias = ":hierarchy", deserialize_with = "one_or_many")]
    pub hierarchy: Vec<String>,

    #[serde(default, alias = ":puppetcert", alias = "puppetcert")]
    pub certseal: SealSettings,
}

/// The `certseal` section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SealSettings {
    /// Base SSL directory
    #[serde(default, alias = ":ssldir")]
    pub ssldir: Option<PathBuf>,
    /// Public key subdirectory of `ssldir`
    #[serde(default, alias = ":pubkeys")]
    pub pubkeys: Option<String>,
    /// Private key subdirectory of `ssldir`
    #[serde(default, alias = ":privkeys")]
    pub privkeys: Option<String>,
    /// Key file name inside the key subdirectories
    #[serde(default, alias = ":cert")]
    pub cert: Option<String>,
    /// Explicit public key path, used when it exists
    #[serde(default, alias = ":pubkey")]
    pub pubkey: Option<PathBuf>,
    /// Explicit private key path, used when it exists
    #[serde(default, alias = ":privkey")]
    pub privkey: Option<PathBuf>,
    /// Directory holding `<source>.sealed` files; may contain `%{var}`
    #[serde(default, alias = ":datadir")]
    pub datadir: Option<String>,
}

impl SealSettings {
    pub fn ssl_dir(&self) -> PathBuf {
        self.ssldir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SSL_DIR))
    }

    pub fn public_key_dir(&self) -> &str {
        self.pubkeys.as_deref().unwrap_or(DEFAULT_PUBLIC_KEY_DIR)
    }

    pub fn private_key_dir(&self) -> &str {
        self.privkeys.as_deref().unwrap_or(DEFAULT_PRIVATE_KEY_DIR)
    }

    /// Configured key file name, or `$HOSTNAME.pem`
    pub fn cert_name(&self) -> ConfigResult<String> {
        if let Some(cert) = &self.cert {
            return Ok(cert.clone());
        }
        match std::env::var("HOSTNAME") {
            Ok(host) if !host.is_empty() => Ok(format!("{host}.pem")),
            _ => Err(ConfigError::MissingCertName),
        }
    }

    pub fn datadir(&self) -> &str {
        self.datadir.as_deref().unwrap_or(DEFAULT_DATADIR)
    }
}

/// Where a settings file was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLevel {
    /// Passed explicitly by the caller
    Explicit,
    /// System-wide (`/etc/puppetlabs/puppet/hiera.yaml`)
    System,
    /// User-level (`~/.config/certseal/config.yaml`)
    User,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::Explicit => "explicit",
            ConfigLevel::System => "system",
            ConfigLevel::User => "user",
        }
    }
}

impl ConfigFile {
    /// Parse settings from YAML text
    pub fn from_yaml(content: &str, origin: &Path) -> ConfigResult<Self> {
        if content.trim().is_empty() {
            return Err(ConfigError::Empty(origin.to_path_buf()));
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Read and parse a settings file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content, path)
    }

    /// User-level settings path (`<config dir>/certseal/config.yaml`)
    pub fn user_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config")
        });
        config_dir.join("certseal").join("config.yaml")
    }

    /// Pick the settings file to use.
    ///
    /// An explicit path must exist. Otherwise the system file is preferred,
    /// then the user file.
    pub fn locate(explicit: Option<&Path>) -> ConfigResult<(PathBuf, ConfigLevel)> {
        if let Some(path) = explicit {
            if path.is_file() {
                return Ok((path.to_path_buf(), ConfigLevel::Explicit));
            }
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let system = PathBuf::from(DEFAULT_CONFIG_PATH);
        if system.is_file() {
            return Ok((system, ConfigLevel::System));
        }
        let user = Self::user_path();
        if user.is_file() {
            return Ok((user, ConfigLevel::User));
        }
        Err(ConfigError::NotFound(system))
    }

    /// Hierarchy with the default applied
    pub fn hierarchy(&self) -> Vec<String> {
        if self.hierarchy.is_empty() {
            vec![DEFAULT_HIERARCHY.to_string()]
        } else {
            self.hierarchy.clone()
        }
    }
}

/// The hierarchy may be written as a single string or a list
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_settings() {
        let yaml = r#"
hierarchy:
  - "%{hostname}"
  - common
certseal:
  ssldir: /srv/ssl
  pubkeys: pub
  privkeys: priv
  cert: node.pem
  datadir: /srv/data
"#;
        let config = ConfigFile::from_yaml(yaml, Path::new("test.yaml")).unwrap();
        assert_eq!(config.hierarchy(), vec!["%{hostname}", "common"]);
        assert_eq!(config.certseal.ssl_dir(), PathBuf::from("/srv/ssl"));
        assert_eq!(config.certseal.public_key_dir(), "pub");
        assert_eq!(config.certseal.private_key_dir(), "priv");
        assert_eq!(config.certseal.cert_name().unwrap(), "node.pem");
        assert_eq!(config.certseal.datadir(), "/srv/data");
    }

    #[test]
    fn test_legacy_symbol_keys() {
        let yaml = r#"
:backends:
  - puppetcert
:hierarchy: common
:puppetcert:
  :ssldir: /var/lib/puppet/ssl
  :cert: legacy.pem
"#;
        let config = ConfigFile::from_yaml(yaml, Path::new("hiera.yaml")).unwrap();
        assert_eq!(config.hierarchy(), vec!["common"]);
        assert_eq!(config.certseal.ssl_dir(), PathBuf::from("/var/lib/puppet/ssl"));
        assert_eq!(config.certseal.cert.as_deref(), Some("legacy.pem"));
    }

    #[test]
    fn test_defaults() {
        let config = ConfigFile::from_yaml("other: value\n", Path::new("x.yaml")).unwrap();
        assert_eq!(config.hierarchy(), vec![DEFAULT_HIERARCHY]);
        assert_eq!(config.certseal.ssl_dir(), PathBuf::from(DEFAULT_SSL_DIR));
        assert_eq!(config.certseal.public_key_dir(), DEFAULT_PUBLIC_KEY_DIR);
        assert_eq!(config.certseal.private_key_dir(), DEFAULT_PRIVATE_KEY_DIR);
        assert_eq!(config.certseal.datadir(), DEFAULT_DATADIR);
    }

    #[test]
    fn test_empty_file_rejected() {
        let err = ConfigFile::from_yaml("  \n", Path::new("empty.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Empty(_)));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let err = ConfigFile::from_yaml("certseal: [unclosed", Path::new("bad.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_and_locate_explicit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hiera.yaml");
        fs::write(&path, "certseal:\n  cert: a.pem\n").unwrap();

        let (found, level) = ConfigFile::locate(Some(&path)).unwrap();
        assert_eq!(found, path);
        assert_eq!(level, ConfigLevel::Explicit);
        assert_eq!(ConfigFile::load(&found).unwrap().certseal.cert.as_deref(), Some("a.pem"));

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            ConfigFile::locate(Some(&missing)),
            Err(ConfigError::NotFound(_))
        ));
    }
}
