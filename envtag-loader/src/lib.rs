//! envtag Loader - Tagged Records from the Environment
//!
//! Fills plain structs from environment variables, override maps and
//! `.env` files, driven by one tag string per field.
//!
//! ```text
//! LoadOptions ──► ResolutionContext (environment, overrides, files)
//!                      │
//! EnvRecord::visit ──► FieldVisitor::field(name, tag, &mut slot)
//!                      │
//!                      ├─ parse_tag   (envtag-dsl)
//!                      ├─ resolve     (envtag-core)
//!                      └─ coerce      (envtag-core)
//! ```
//!
//! ```no_run
//! use envtag_loader::{env_record, from_env, LoadOptions};
//!
//! #[derive(Debug, Default)]
//! struct Config {
//!     port: u16,
//!     hosts: Vec<String>,
//! }
//!
//! env_record!(Config {
//!     port = "PORT,default=8080",
//!     hosts = "HOSTS,split=,,optional",
//! });
//!
//! let config: Config = from_env(&LoadOptions::new().with_prefix("APP_").with_dotenv())?;
//! # Ok::<(), envtag_loader::LoadError>(())
//! ```

pub mod dotenv;
pub mod error;
pub mod loader;
pub mod options;
pub mod record;

pub use dotenv::{read_env_file, read_env_files, FILES_SOURCE};
pub use error::{LoadError, LoadResult};
pub use loader::{
    build_context, describe, env_example, from_env, load, load_with_context, OVERRIDES_SOURCE,
};
pub use options::{EnvFile, LoadOptions, DEFAULT_DOTENV_FILE};
pub use record::{EnvRecord, FieldDescription, FieldVisitor};

// Re-export the types records and callers touch directly.
pub use envtag_core::{
    EnvTagError, EnvValue, FieldError, MapSource, ResolutionContext, TagDescriptor, ValueSource,
};
