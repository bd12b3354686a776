//! Loader error types

use envtag_core::FieldError;
use std::path::PathBuf;
use thiserror::Error;

/// Error returned by the record-level loader operations.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A field failed to parse, resolve, or convert.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// A required env file could not be read.
    #[error("failed to read env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

impl LoadError {
    /// The field error, if this failure belongs to a field.
    pub fn field_error(&self) -> Option<&FieldError> {
        match self {
            LoadError::Field(err) => Some(err),
            LoadError::EnvFile { .. } => None,
        }
    }
}

/// Result type alias for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;
