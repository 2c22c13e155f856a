//! Data sources and the provider trait the resolver pulls them from

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::envelope::PrivateKeyMaterial;

use super::error::SourceResult;
use super::scope::Scope;

/// One sealed document location in the precedence list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataSource {
    name: String,
    location: Option<PathBuf>,
}

impl DataSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }

    /// A source whose provider already knows where the bytes live
    pub fn with_location(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            location: Some(location.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Supplies sources, their sealed bytes and the keys to open them
///
/// Implementations:
/// - `FileSourceProvider`: `<datadir>/<source>.sealed` files and on-disk keys
/// - `MemorySourceProvider`: in-memory documents, for tests and embedding
///
/// An `Err` from `sealed_bytes` or `private_key` means "no data here"; the
/// resolver skips the source.
pub trait SourceProvider: Send + Sync {
    /// Human-readable name of this provider
    fn name(&self) -> &str;

    /// Sources for a scope, highest precedence first
    fn sources(&self, scope: &Scope, order_override: Option<&str>) -> Vec<DataSource>;

    /// Raw sealed document for a source
    fn sealed_bytes(&self, source: &DataSource) -> SourceResult<Vec<u8>>;

    /// Private key that opens a source
    fn private_key(&self, source: &DataSource) -> SourceResult<Arc<PrivateKeyMaterial>>;
}

/// Interpolate a hierarchy for a scope.
///
/// `order_override` goes first. Entries that come out empty, or with a
/// leading, trailing or doubled `/` (a variable that was not set), are
/// dropped, as are repeats.
pub fn expand_hierarchy(
    hierarchy: &[String],
    scope: &Scope,
    order_override: Option<&str>,
) -> Vec<String> {
    let mut expanded: Vec<String> = Vec::with_capacity(hierarchy.len() + 1);
    let entries = order_override
        .into_iter()
        .chain(hierarchy.iter().map(String::as_str));

    for entry in entries {
        let name = scope.interpolate(entry);
        if name.is_empty() || name.starts_with('/') || name.ends_with('/') || name.contains("//") {
            continue;
        }
        if !expanded.contains(&name) {
            expanded.push(name);
        }
    }
    expanded
}
