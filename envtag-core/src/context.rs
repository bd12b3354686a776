//! Value sources and the resolution context
//!
//! A context is an ordered list of named sources plus a key prefix. Sources
//! are consulted highest precedence first and are never mutated.

use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// A named key/value mapping consulted during resolution.
pub trait ValueSource: Send + Sync {
    /// Name reported as the origin of values found here.
    fn name(&self) -> &str;

    /// Returns the value stored under `key`, if any. An empty string is a value.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl ValueSource for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn lookup(&self, key: &str) -> Option<String> {
        // A set variable always shadows lower sources, even when not unicode.
        std::env::var_os(key).map(|value| match value.into_string() {
            Ok(value) => value,
            Err(raw) => {
                warn!(key, "environment value is not valid unicode, replacing invalid bytes");
                raw.to_string_lossy().into_owned()
            }
        })
    }
}

/// In-memory mapping, used for overrides and file-derived values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapSource {
    name: String,
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    pub fn with_values<I, K, V>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut source = Self::new(name);
        source.extend(values);
        source
    }

    /// Insert a value, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Merge entries; later entries win for duplicate keys.
    pub fn extend<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in values {
            self.insert(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ValueSource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Prefix plus sources in precedence order.
#[derive(Default)]
pub struct ResolutionContext {
    prefix: String,
    sources: Vec<Box<dyn ValueSource>>,
}

impl ResolutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Append a source below every source added so far.
    pub fn with_source(mut self, source: impl ValueSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn sources(&self) -> impl Iterator<Item = &dyn ValueSource> {
        self.sources.iter().map(|source| source.as_ref())
    }

    /// Key actually searched for: the prefix is added unless already present.
    pub fn effective_key(&self, lookup_key: &str) -> String {
        if self.prefix.is_empty() || lookup_key.starts_with(&self.prefix) {
            lookup_key.to_string()
        } else {
            format!("{}{}", self.prefix, lookup_key)
        }
    }

    /// First source holding `key`, with that source's name.
    pub fn lookup(&self, key: &str) -> Option<(&str, String)> {
        self.sources
            .iter()
            .find_map(|source| source.lookup(key).map(|value| (source.name(), value)))
    }
}

impl fmt::Debug for ResolutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|source| source.name()).collect();
        f.debug_struct("ResolutionContext")
            .field("prefix", &self.prefix)
            .field("sources", &names)
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
