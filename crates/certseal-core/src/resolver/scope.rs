//! Lookup scope and `%{var}` interpolation

use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

/// Variables visible to a lookup (node facts and the like)
///
/// `%{name}` in hierarchy entries, the data directory and matched answers is
/// replaced with the variable's value. `%{::name}` means the same variable.
/// Unknown variables interpolate to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    vars: BTreeMap<String, String>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        let name = name.strip_prefix("::").unwrap_or(name);
        self.vars.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Replace every `%{name}` in `text`
    pub fn interpolate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find("%{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find('}') {
                Some(end) => {
                    out.push_str(self.get(&after[..end]).unwrap_or(""));
                    rest = &after[end + 1..];
                }
                None => {
                    // unterminated, keep as written
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Interpolate every string inside a YAML value, mapping keys included.
    ///
    /// When two keys interpolate to the same string the first one is kept.
    pub fn interpolate_value(&self, value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.interpolate(&s)),
            Value::Sequence(items) => Value::Sequence(
                items.into_iter().map(|v| self.interpolate_value(v)).collect(),
            ),
            Value::Mapping(map) => {
                let mut out = Mapping::with_capacity(map.len());
                for (k, v) in map {
                    let k = self.interpolate_value(k);
                    if !out.contains_key(&k) {
                        out.insert(k, self.interpolate_value(v));
                    }
                }
                Value::Mapping(out)
            }
            Value::Tagged(mut tagged) => {
                tagged.value = self.interpolate_value(tagged.value);
                Value::Tagged(tagged)
            }
            other => other,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Scope {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut scope = Scope::new();
        for (k, v) in iter {
            scope.insert(k, v);
        }
        scope
    }
}
