//! Hierarchical lookup over sealed documents
//!
//! A query (`key`, `mode`) visits an ordered list of data sources, highest
//! precedence first. Each source is decrypted, parsed as a YAML mapping and,
//! if it holds `key`, folded into the answer:
//!
//! - `First`: the first source holding the key wins; the scan stops there
//! - `Array`: every matching sequence is appended, in source order
//! - `Hash`: every matching mapping is merged, earlier sources win conflicts
//!
//! A source that cannot be read contributes nothing and the scan carries on.
//! Only a value whose shape contradicts the mode aborts the lookup.

mod error;
mod mode;
mod scope;
mod traits;
mod lookup;
mod file_source;
mod memory_source;

pub use error::{LookupError, LookupResult, SourceError, SourceResult};
pub use mode::{Answer, ResolutionMode};
pub use scope::Scope;
pub use traits::{expand_hierarchy, DataSource, SourceProvider};
pub use lookup::HierarchicalResolver;
pub use file_source::FileSourceProvider;
pub use memory_source::MemorySourceProvider;
