//! Load options
//!
//! Builder for everything the loader needs besides the record itself:
//! key prefix, override values, env files and the primary environment.

use envtag_core::{EnvSource, ValueSource};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File read by [`LoadOptions::with_dotenv`].
pub const DEFAULT_DOTENV_FILE: &str = ".env";

/// An env file to read before resolving fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvFile {
    pub path: PathBuf,
    /// A missing required file fails the load; a missing optional one is skipped.
    pub required: bool,
}

/// Options for [`load`](crate::load) and [`from_env`](crate::from_env).
///
/// Resolution order is: environment, then overrides, then files (later files
/// win over earlier ones), then tag defaults.
#[derive(Clone)]
pub struct LoadOptions {
    prefix: String,
    overrides: HashMap<String, String>,
    files: Vec<EnvFile>,
    environment: Arc<dyn ValueSource>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            overrides: HashMap::new(),
            files: Vec::new(),
            environment: Arc::new(EnvSource),
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` to every lookup key that does not already start with it.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Add fallback values consulted after the environment. Later calls win.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.overrides.extend(
            overrides
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        self
    }

    /// Read a required env file.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(EnvFile {
            path: path.as_ref().to_path_buf(),
            required: true,
        });
        self
    }

    /// Read an env file if it exists.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.files.push(EnvFile {
            path: path.as_ref().to_path_buf(),
            required: false,
        });
        self
    }

    /// Read `.env` from the working directory if it exists.
    pub fn with_dotenv(self) -> Self {
        self.with_optional_file(DEFAULT_DOTENV_FILE)
    }

    /// Replace the process environment as the primary source.
    pub fn with_environment(mut self, source: impl ValueSource + 'static) -> Self {
        self.environment = Arc::new(source);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn overrides(&self) -> &HashMap<String, String> {
        &self.overrides
    }

    pub fn files(&self) -> &[EnvFile] {
        &self.files
    }

    pub(crate) fn environment(&self) -> SharedSource {
        SharedSource(Arc::clone(&self.environment))
    }
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("prefix", &self.prefix)
            .field("overrides", &self.overrides.len())
            .field("files", &self.files)
            .field("environment", &self.environment.name())
            .finish()
    }
}

/// Primary source shared between an options value and the contexts built from it.
pub(crate) struct SharedSource(Arc<dyn ValueSource>);

impl ValueSource for SharedSource {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.0.lookup(key)
    }
}
