//! Error types for envtag operations

use crate::Kind;
use thiserror::Error;

/// What went wrong while parsing a tag.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("tag is empty")]
    EmptyTag,

    #[error("invalid token \"{token}\"")]
    InvalidToken { token: String },

    #[error("{option} option is missing '='")]
    MissingEquals { option: &'static str },

    #[error("split option is missing its delimiter")]
    MissingDelimiter,

    #[error("ambiguous split delimiter \"{delimiter}\" followed by \"{next}\"")]
    AmbiguousDelimiter { delimiter: String, next: String },

    #[error("default option is missing its value")]
    MissingDefault,

    #[error("invalid default value \"{token}\"")]
    InvalidDefault { token: String },

    #[error("missing closing ']' in default value")]
    UnterminatedDefault,

    #[error("nested '[' in default value")]
    NestedBracket,

    #[error("default value '[]' is empty")]
    EmptyDefault,

    #[error("expected ',' after {option} option, found \"{found}\"")]
    MissingSeparator { option: &'static str, found: String },
}

/// Malformed annotation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to parse tag \"{tag}\" at offset {offset}: {kind}")]
pub struct ParseError {
    pub tag: String,
    /// Byte offset of the offending fragment within `tag`.
    pub offset: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(tag: impl Into<String>, offset: usize, kind: ParseErrorKind) -> Self {
        Self {
            tag: tag.into(),
            offset,
            kind,
        }
    }
}

/// No value could be found for a field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("required field has no value and no default (lookup key: {key})")]
    MissingValue { key: String },
}

impl ResolutionError {
    /// Effective lookup key the resolver searched for.
    pub fn key(&self) -> &str {
        match self {
            ResolutionError::MissingValue { key } => key,
        }
    }
}

/// A raw string could not be coerced into the target type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("invalid {kind} value \"{value}\": {reason}")]
    InvalidScalar {
        kind: Kind,
        value: String,
        reason: String,
    },

    #[error("list element {index} is invalid: {source}")]
    InvalidElement {
        index: usize,
        source: Box<ConversionError>,
    },

    #[error("map entry {index} (\"{entry}\") is malformed: missing '{separator}'")]
    MalformedEntry {
        index: usize,
        entry: String,
        separator: char,
    },

    #[error("map key \"{key}\" is invalid: {source}")]
    InvalidKey {
        key: String,
        source: Box<ConversionError>,
    },

    #[error("map value for key \"{key}\" is invalid: {source}")]
    InvalidValue {
        key: String,
        source: Box<ConversionError>,
    },

    #[error("value {value} is out of range for {type_name}")]
    OutOfRange {
        value: String,
        type_name: &'static str,
    },

    #[error("unsupported type: {type_name}")]
    UnsupportedType { type_name: String },

    #[error("expected {expected} but coerced value has a different shape")]
    ShapeMismatch { expected: String },
}

/// Master error type for everything that can fail while loading one field.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EnvTagError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),
}

/// Error scoped to the record field it originated from.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to load field \"{field}\": {source}")]
pub struct FieldError {
    /// Dotted path of the field inside its record, e.g. `database.port`.
    pub field: String,
    pub source: EnvTagError,
}

impl FieldError {
    pub fn new(field: impl Into<String>, source: impl Into<EnvTagError>) -> Self {
        Self {
            field: field.into(),
            source: source.into(),
        }
    }
}

/// Result type alias for envtag operations.
pub type EnvTagResult<T> = Result<T, EnvTagError>;

// =============================================================================
// TESTS
// =============================================================================
