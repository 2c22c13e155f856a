//! Key file location
//!
//! Keys live at `<ssldir>/<public_keys|private_keys>/<cert>`, unless the
//! settings name an explicit key file that exists.

use std::path::{Path, PathBuf};

use crate::envelope::{CipherResult, PrivateKeyMaterial, PublicKeyMaterial};

use super::error::ConfigResult;
use super::file::SealSettings;

/// Resolved key locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLocator {
    pub ssl_dir: PathBuf,
    pub public_key_dir: String,
    pub private_key_dir: String,
    pub cert_name: String,
    pub public_key_override: Option<PathBuf>,
    pub private_key_override: Option<PathBuf>,
}

impl KeyLocator {
    pub fn new(
        ssl_dir: impl Into<PathBuf>,
        public_key_dir: impl Into<String>,
        private_key_dir: impl Into<String>,
        cert_name: impl Into<String>,
    ) -> Self {
        Self {
            ssl_dir: ssl_dir.into(),
            public_key_dir: public_key_dir.into(),
            private_key_dir: private_key_dir.into(),
            cert_name: cert_name.into(),
            public_key_override: None,
            private_key_override: None,
        }
    }

    /// Build from the `certseal` settings section, applying defaults
    pub fn from_settings(settings: &SealSettings) -> ConfigResult<Self> {
        Ok(Self {
            ssl_dir: settings.ssl_dir(),
            public_key_dir: settings.public_key_dir().to_string(),
            private_key_dir: settings.private_key_dir().to_string(),
            cert_name: settings.cert_name()?,
            public_key_override: settings.pubkey.clone(),
            private_key_override: settings.privkey.clone(),
        })
    }

    pub fn public_key_path(&self) -> PathBuf {
        Self::pick(
            self.public_key_override.as_deref(),
            self.ssl_dir.join(&self.public_key_dir).join(&self.cert_name),
        )
    }

    pub fn private_key_path(&self) -> PathBuf {
        Self::pick(
            self.private_key_override.as_deref(),
            self.ssl_dir.join(&self.private_key_dir).join(&self.cert_name),
        )
    }

    pub fn load_public_key(&self) -> CipherResult<PublicKeyMaterial> {
        PublicKeyMaterial::load(self.public_key_path())
    }

    pub fn load_private_key(&self) -> CipherResult<PrivateKeyMaterial> {
        PrivateKeyMaterial::load(self.private_key_path())
    }

    fn pick(explicit: Option<&Path>, conventional: PathBuf) -> PathBuf {
        match explicit {
            Some(path) if path.is_file() => path.to_path_buf(),
            _ => conventional,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::CipherError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_conventional_paths() {
        let locator = KeyLocator::new("/ssl", "public_keys", "private_keys", "node.pem");
        assert_eq!(locator.public_key_path(), PathBuf::from("/ssl/public_keys/node.pem"));
        assert_eq!(locator.private_key_path(), PathBuf::from("/ssl/private_keys/node.pem"));
    }

    #[test]
    fn test_existing_override_wins() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().join("explicit.pem");
        fs::write(&explicit, "placeholder").unwrap();

        let mut locator = KeyLocator::new("/ssl", "public_keys", "private_keys", "node.pem");
        locator.public_key_override = Some(explicit.clone());
        locator.private_key_override = Some(dir.path().join("absent.pem"));

        assert_eq!(locator.public_key_path(), explicit);
        assert_eq!(locator.private_key_path(), PathBuf::from("/ssl/private_keys/node.pem"));
    }

    #[test]
    fn test_from_settings() {
        let settings = SealSettings {
            ssldir: Some(PathBuf::from("/etc/ssl")),
            cert: Some("web01.pem".to_string()),
            ..Default::default()
        };
        let locator = KeyLocator::from_settings(&settings).unwrap();
        assert_eq!(locator.public_key_path(), PathBuf::from("/etc/ssl/public_keys/web01.pem"));
    }

    #[test]
    fn test_missing_key_is_key_load_error() {
        let locator = KeyLocator::new("/nonexistent", "public_keys", "private_keys", "node.pem");
        assert!(matches!(locator.load_private_key(), Err(CipherError::KeyLoad { .. })));
    }
}
