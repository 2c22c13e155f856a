//! In-memory source provider

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::envelope::PrivateKeyMaterial;

use super::error::{SourceError, SourceResult};
use super::scope::Scope;
use super::traits::{expand_hierarchy, DataSource, SourceProvider};

/// Source provider backed by maps of sealed documents and keys
///
/// Every call to `sealed_bytes` is recorded, so callers can check which
/// sources a lookup actually read.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use certseal_core::envelope::{seal_bytes, PrivateKeyMaterial};
/// use certseal_core::resolver::MemorySourceProvider;
///
/// # fn demo(key: PrivateKeyMaterial) {
/// let provider = MemorySourceProvider::new(["node", "common"])
///     .with_default_key(Arc::new(key.clone()));
/// provider.insert_sealed("common", seal_bytes(b"ntp: pool.ntp.org\n", &key.public_half()).unwrap());
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemorySourceProvider {
    hierarchy: Vec<String>,
    documents: RwLock<HashMap<String, Vec<u8>>>,
    keys: RwLock<HashMap<String, Arc<PrivateKeyMaterial>>>,
    default_key: Option<Arc<PrivateKeyMaterial>>,
    reads: Mutex<Vec<String>>,
}

impl MemorySourceProvider {
    pub fn new<I, S>(hierarchy: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hierarchy: hierarchy.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Key used for sources without a key of their own
    pub fn with_default_key(mut self, key: Arc<PrivateKeyMaterial>) -> Self {
        self.default_key = Some(key);
        self
    }

    pub fn insert_sealed(&self, name: impl Into<String>, sealed: Vec<u8>) {
        self.documents.write().insert(name.into(), sealed);
    }

    pub fn insert_key(&self, name: impl Into<String>, key: Arc<PrivateKeyMaterial>) {
        self.keys.write().insert(name.into(), key);
    }

    pub fn remove(&self, name: &str) -> bool {
        self.documents.write().remove(name).is_some()
    }

    /// Names whose sealed bytes were requested, in request order
    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().clone()
    }

    pub fn clear_reads(&self) {
        self.reads.lock().clear();
    }
}

impl SourceProvider for MemorySourceProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn sources(&self, scope: &Scope, order_override: Option<&str>) -> Vec<DataSource> {
        expand_hierarchy(&self.hierarchy, scope, order_override)
            .into_iter()
            .map(DataSource::new)
            .collect()
    }

    fn sealed_bytes(&self, source: &DataSource) -> SourceResult<Vec<u8>> {
        self.reads.lock().push(source.name().to_string());
        self.documents
            .read()
            .get(source.name())
            .cloned()
            .ok_or_else(|| SourceError::unavailable(source.name(), "no such document"))
    }

    fn private_key(&self, source: &DataSource) -> SourceResult<Arc<PrivateKeyMaterial>> {
        if let Some(key) = self.keys.read().get(source.name()) {
            return Ok(Arc::clone(key));
        }
        self.default_key
            .clone()
            .ok_or_else(|| SourceError::unavailable(source.name(), "no private key"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_follow_hierarchy() {
        let provider = MemorySourceProvider::new(["%{hostname}", "common"]);
        let scope = Scope::new().with("hostname", "db01");
        let names: Vec<_> = provider
            .sources(&scope, None)
            .into_iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, vec!["db01", "common"]);
    }

    #[test]
    fn test_missing_document_is_unavailable_and_recorded() {
        let provider = MemorySourceProvider::new(["common"]);
        let err = provider.sealed_bytes(&DataSource::new("common")).unwrap_err();
        assert!(matches!(err, SourceError::Unavailable { .. }));
        assert_eq!(provider.reads(), vec!["common"]);

        provider.clear_reads();
        assert!(provider.reads().is_empty());
    }

    #[test]
    fn test_missing_key_is_unavailable() {
        let provider = MemorySourceProvider::new(["common"]);
        provider.insert_sealed("common", b"".to_vec());
        assert!(provider.sealed_bytes(&DataSource::new("common")).is_ok());
        assert!(matches!(
            provider.private_key(&DataSource::new("common")),
            Err(SourceError::Unavailable { .. })
        ));
        assert!(provider.remove("common"));
    }
}
