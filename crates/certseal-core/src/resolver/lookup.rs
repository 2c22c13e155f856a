//! The lookup engine

use std::ops::ControlFlow;
use std::sync::Arc;

use serde_yaml::Value;

use crate::envelope::open_bytes;
use crate::logging::{Logger, NoOpLogger, SharedLogger};

use super::error::{LookupError, LookupResult, SourceError, SourceResult};
use super::mode::{kind_of, Answer, ResolutionMode};
use super::scope::Scope;
use super::traits::{DataSource, SourceProvider};

/// Resolves keys across the sources of a [`SourceProvider`]
///
/// Sources are visited strictly in order, one at a time: `First` stops at the
/// first match and `Hash` lets earlier sources win, so order is the contract.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use certseal_core::config::ConfigFile;
/// use certseal_core::resolver::{FileSourceProvider, HierarchicalResolver, ResolutionMode, Scope};
///
/// let config = ConfigFile::load("/etc/puppetlabs/puppet/hiera.yaml").unwrap();
/// let provider = FileSourceProvider::from_config(&config).unwrap();
/// let resolver = HierarchicalResolver::new(Arc::new(provider));
///
/// let scope = Scope::new().with("hostname", "web01");
/// let answer = resolver.resolve("ntp_servers", &scope, None, ResolutionMode::Array).unwrap();
/// ```
pub struct HierarchicalResolver {
    provider: Arc<dyn SourceProvider>,
    logger: SharedLogger,
}

impl HierarchicalResolver {
    pub fn new(provider: Arc<dyn SourceProvider>) -> Self {
        Self {
            provider,
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn provider(&self) -> &Arc<dyn SourceProvider> {
        &self.provider
    }

    /// Ask the provider for the sources of `scope`, then look `key` up in them
    pub fn resolve(
        &self,
        key: &str,
        scope: &Scope,
        order_override: Option<&str>,
        mode: ResolutionMode,
    ) -> LookupResult<Answer> {
        let sources = self.provider.sources(scope, order_override);
        self.lookup(key, &sources, mode, scope)
    }

    /// Look `key` up in `sources`, highest precedence first.
    ///
    /// Unreadable sources are logged and skipped. The only error is a matched
    /// value whose shape does not fit `mode`.
    pub fn lookup(
        &self,
        key: &str,
        sources: &[DataSource],
        mode: ResolutionMode,
        scope: &Scope,
    ) -> LookupResult<Answer> {
        self.logger.debug(&format!(
            "lookup '{}' ({}) across {} sources via {}",
            key,
            mode,
            sources.len(),
            self.provider.name()
        ));

        let mut answer = Answer::empty(mode);
        for source in sources {
            let value = match self.read_source(key, source) {
                Ok(Some(value)) => value,
                Ok(None) => {
                    self.logger.debug(&format!("'{key}' not in source {source}"));
                    continue;
                }
                Err(e) => {
                    self.logger.log(e.severity(), &format!("skipping: {e}"));
                    continue;
                }
            };

            self.logger.debug(&format!("'{key}' found in source {source}"));
            let value = scope.interpolate_value(value);
            if fold(&mut answer, key, source, value)?.is_break() {
                break;
            }
        }
        Ok(answer)
    }

    /// Decrypt and parse one source; `Ok(None)` when it lacks `key`
    fn read_source(&self, key: &str, source: &DataSource) -> SourceResult<Option<Value>> {
        let sealed = self.provider.sealed_bytes(source)?;
        let private_key = self.provider.private_key(source)?;

        let plaintext = open_bytes(&sealed, &private_key).map_err(|error| SourceError::Decrypt {
            name: source.name().to_string(),
            error,
        })?;
        if plaintext.iter().all(u8::is_ascii_whitespace) {
            return Err(SourceError::Empty {
                name: source.name().to_string(),
            });
        }

        let document: Value = serde_yaml::from_slice(&plaintext).map_err(|e| SourceError::Parse {
            name: source.name().to_string(),
            reason: e.to_string(),
        })?;
        match document {
            Value::Mapping(map) if !map.is_empty() => Ok(map.get(key).cloned()),
            Value::Mapping(_) | Value::Null => Err(SourceError::Empty {
                name: source.name().to_string(),
            }),
            other => Err(SourceError::NotAMapping {
                name: source.name().to_string(),
                found: kind_of(&other),
            }),
        }
    }
}

impl std::fmt::Debug for HierarchicalResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HierarchicalResolver")
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Fold one matched value into the answer. `Break` ends the scan.
fn fold(
    answer: &mut Answer,
    key: &str,
    source: &DataSource,
    value: Value,
) -> LookupResult<ControlFlow<()>> {
    let mode = answer.mode();
    let mismatch = |value: &Value| LookupError::TypeMismatch {
        key: key.to_string(),
        name: source.name().to_string(),
        mode,
        found: kind_of(value),
    };

    match answer {
        Answer::First(slot) => {
            *slot = Some(value);
            Ok(ControlFlow::Break(()))
        }
        Answer::Array(items) => match value {
            Value::Sequence(values) => {
                items.extend(values);
                Ok(ControlFlow::Continue(()))
            }
            other => Err(mismatch(&other)),
        },
        Answer::Hash(merged) => match value {
            Value::Mapping(map) => {
                // top level only; keys already present came from higher precedence
                for (k, v) in map {
                    if !merged.contains_key(&k) {
                        merged.insert(k, v);
                    }
                }
                Ok(ControlFlow::Continue(()))
            }
            other => Err(mismatch(&other)),
        },
    }
}
