//! envtag Core - Descriptors, Resolution and Coercion
//!
//! Pure data structures plus the two engines that turn a parsed tag into a
//! typed value:
//!
//! ```text
//! TagDescriptor + ResolutionContext
//!     ↓
//! resolve()  (source precedence, default, optional)
//!     ↓
//! raw string
//!     ↓
//! coerce()   (scalar / list / map)
//!     ↓
//! TypedValue
//! ```
//!
//! Nothing in this crate performs I/O except [`EnvSource`], which reads the
//! live process environment on lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod coerce;
pub mod context;
pub mod error;
pub mod resolve;
pub mod value;

pub use coerce::{coerce, coerce_scalar};
pub use context::{EnvSource, MapSource, ResolutionContext, ValueSource};
pub use error::*;
pub use resolve::{resolve, Resolved, ValueOrigin};
pub use value::{parse_as, parse_scalar, EnvScalar, EnvValue, Scalar, TypedValue};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Delimiter used for list and map values when the tag carries no `split=`.
pub const DEFAULT_SPLIT: &str = "|";

/// Separator between key and value inside a single map entry.
pub const MAP_ENTRY_SEPARATOR: char = ':';

// ============================================================================
// TAG DESCRIPTOR
// ============================================================================

/// Parsed form of one field annotation.
///
/// Created once per tag string by the parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TagDescriptor {
    /// Key used for source lookups, before the context prefix is applied.
    pub lookup_key: String,
    /// A missing value is not an error when set.
    pub optional: bool,
    /// Raw default literal. Never empty when present.
    pub default_value: Option<String>,
    /// Delimiter for list/map values.
    pub split_on: Option<String>,
}

impl TagDescriptor {
    pub fn new(lookup_key: impl Into<String>) -> Self {
        Self {
            lookup_key: lookup_key.into(),
            ..Self::default()
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_split(mut self, delimiter: impl Into<String>) -> Self {
        self.split_on = Some(delimiter.into());
        self
    }

    /// Delimiter that collection coercion will use for this field.
    pub fn delimiter(&self) -> &str {
        self.split_on.as_deref().unwrap_or(DEFAULT_SPLIT)
    }
}

// ============================================================================
// COERCION TARGETS
// ============================================================================

/// Scalar kinds the coercion engine can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    String,
    Integer,
    Float,
    Boolean,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// Semantic shape a destination field needs.
///
/// Derived from the field's declared type, never from the tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoercionTarget {
    Scalar(Kind),
    List(Kind),
    Map(Kind, Kind),
    /// A shape the engine cannot build; coercion always fails.
    Unsupported(String),
}

impl CoercionTarget {
    pub fn is_collection(&self) -> bool {
        matches!(self, CoercionTarget::List(_) | CoercionTarget::Map(_, _))
    }
}

impl fmt::Display for CoercionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionTarget::Scalar(kind) => write!(f, "{}", kind),
            CoercionTarget::List(kind) => write!(f, "list<{}>", kind),
            CoercionTarget::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            CoercionTarget::Unsupported(name) => write!(f, "unsupported({})", name),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
