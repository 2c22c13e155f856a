//! Source provider over `<datadir>/<source>.sealed` files

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::config::{ConfigFile, ConfigResult, KeyLocator};
use crate::envelope::{PrivateKeyMaterial, SEALED_EXTENSION};

use super::error::{SourceError, SourceResult};
use super::scope::Scope;
use super::traits::{expand_hierarchy, DataSource, SourceProvider};

/// Reads sealed documents from a data directory
///
/// One private key opens every source. It is loaded on first successful use
/// and kept for the lifetime of the provider; a failed load is retried on the
/// next request.
#[derive(Debug)]
pub struct FileSourceProvider {
    hierarchy: Vec<String>,
    datadir: String,
    locator: KeyLocator,
    private_key: OnceCell<Arc<PrivateKeyMaterial>>,
}

impl FileSourceProvider {
    /// `datadir` may contain `%{var}` placeholders
    pub fn new(hierarchy: Vec<String>, datadir: impl Into<String>, locator: KeyLocator) -> Self {
        Self {
            hierarchy,
            datadir: datadir.into(),
            locator,
            private_key: OnceCell::new(),
        }
    }

    pub fn from_config(config: &ConfigFile) -> ConfigResult<Self> {
        Ok(Self::new(
            config.hierarchy(),
            config.certseal.datadir(),
            KeyLocator::from_settings(&config.certseal)?,
        ))
    }

    pub fn locator(&self) -> &KeyLocator {
        &self.locator
    }

    /// Path of the sealed file for `name` under this scope
    pub fn datafile(&self, scope: &Scope, name: &str) -> PathBuf {
        PathBuf::from(scope.interpolate(&self.datadir))
            .join(format!("{name}.{SEALED_EXTENSION}"))
    }
}

impl SourceProvider for FileSourceProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn sources(&self, scope: &Scope, order_override: Option<&str>) -> Vec<DataSource> {
        expand_hierarchy(&self.hierarchy, scope, order_override)
            .into_iter()
            .map(|name| {
                let location = self.datafile(scope, &name);
                DataSource::with_location(name, location)
            })
            .collect()
    }

    fn sealed_bytes(&self, source: &DataSource) -> SourceResult<Vec<u8>> {
        let path = match source.location() {
            Some(path) => path.to_path_buf(),
            None => self.datafile(&Scope::new(), source.name()),
        };
        if !path.is_file() {
            return Err(SourceError::unavailable(
                source.name(),
                format!("cannot find datafile {}", path.display()),
            ));
        }
        fs::read(&path).map_err(|e| SourceError::unavailable(source.name(), e))
    }

    fn private_key(&self, source: &DataSource) -> SourceResult<Arc<PrivateKeyMaterial>> {
        self.private_key
            .get_or_try_init(|| self.locator.load_private_key().map(Arc::new))
            .map(Arc::clone)
            .map_err(|e| SourceError::unavailable(source.name(), e))
    }
}
