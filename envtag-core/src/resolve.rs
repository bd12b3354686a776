//! Value resolution
//!
//! Picks the single raw string a field will be coerced from:
//! 1. First source (in context order) holding the effective key
//! 2. The tag's default literal
//! 3. Nothing, if the field is optional
//!
//! Values are never merged across sources.

use crate::context::ResolutionContext;
use crate::error::ResolutionError;
use crate::TagDescriptor;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueOrigin {
    /// Named value source.
    Source(String),
    /// The tag's `default=` literal.
    Default,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolved {
    Value {
        /// Effective lookup key, prefix included.
        key: String,
        raw: String,
        origin: ValueOrigin,
    },
    /// Optional field without value; the caller applies the zero value.
    Absent { key: String },
}

impl Resolved {
    pub fn raw(&self) -> Option<&str> {
        match self {
            Resolved::Value { raw, .. } => Some(raw),
            Resolved::Absent { .. } => None,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Resolved::Value { key, .. } | Resolved::Absent { key } => key,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent { .. })
    }
}

/// Resolve the raw value for `descriptor` against `context`.
pub fn resolve(
    descriptor: &TagDescriptor,
    context: &ResolutionContext,
) -> Result<Resolved, ResolutionError> {
    let key = context.effective_key(&descriptor.lookup_key);

    if let Some((source, raw)) = context.lookup(&key) {
        debug!(key = %key, origin = source, "resolved value from source");
        return Ok(Resolved::Value {
            origin: ValueOrigin::Source(source.to_string()),
            key,
            raw,
        });
    }

    if let Some(default) = &descriptor.default_value {
        debug!(key = %key, origin = "default", "resolved value from tag default");
        return Ok(Resolved::Value {
            key,
            raw: default.clone(),
            origin: ValueOrigin::Default,
        });
    }

    if descriptor.optional {
        debug!(key = %key, "optional value is absent");
        return Ok(Resolved::Absent { key });
    }

    Err(ResolutionError::MissingValue { key })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::MapSource;

    fn context() -> ResolutionContext {
        ResolutionContext::new()
            .with_source(MapSource::with_values(
                "environment",
                [("PORT", "8080"), ("BOTH", "from-env")],
            ))
            .with_source(MapSource::with_values(
                "overrides",
                [("BOTH", "from-override"), ("FALLBACK", "from-override")],
            ))
            .with_source(MapSource::with_values(
                "files",
                [("FALLBACK", "from-file"), ("FILE_ONLY", "from-file")],
            ))
    }

    #[test]
    fn test_resolves_from_primary_source() {
        let resolved = resolve(&TagDescriptor::new("PORT"), &context()).unwrap();
        assert_eq!(
            resolved,
            Resolved::Value {
                key: "PORT".to_string(),
                raw: "8080".to_string(),
                origin: ValueOrigin::Source("environment".to_string()),
            }
        );
    }

    #[test]
    fn test_primary_source_wins_over_fallback() {
        let resolved = resolve(&TagDescriptor::new("BOTH"), &context()).unwrap();
        assert_eq!(resolved.raw(), Some("from-env"));
    }

    #[test]
    fn test_overrides_win_over_files() {
        let resolved = resolve(&TagDescriptor::new("FALLBACK"), &context()).unwrap();
        assert_eq!(resolved.raw(), Some("from-override"));
        let resolved = resolve(&TagDescriptor::new("FILE_ONLY"), &context()).unwrap();
        assert_eq!(resolved.raw(), Some("from-file"));
    }

    #[test]
    fn test_source_value_beats_default() {
        let descriptor = TagDescriptor::new("PORT").with_default("9000");
        let resolved = resolve(&descriptor, &context()).unwrap();
        assert_eq!(resolved.raw(), Some("8080"));
    }

    #[test]
    fn test_default_used_when_no_source_has_key() {
        let descriptor = TagDescriptor::new("NUMS")
            .with_split("|")
            .with_default("1|2|3");
        let resolved = resolve(&descriptor, &context()).unwrap();
        assert_eq!(
            resolved,
            Resolved::Value {
                key: "NUMS".to_string(),
                raw: "1|2|3".to_string(),
                origin: ValueOrigin::Default,
            }
        );
    }

    #[test]
    fn test_default_wins_over_optional_absence() {
        let descriptor = TagDescriptor::new("MISSING").optional().with_default("x");
        let resolved = resolve(&descriptor, &context()).unwrap();
        assert_eq!(resolved.raw(), Some("x"));
    }

    #[test]
    fn test_optional_missing_is_absent() {
        let descriptor = TagDescriptor::new("PORT_MISSING").optional();
        let resolved = resolve(&descriptor, &context()).unwrap();
        assert!(resolved.is_absent());
        assert_eq!(resolved.key(), "PORT_MISSING");
        assert_eq!(resolved.raw(), None);
    }

    #[test]
    fn test_required_missing_fails_with_key() {
        let err = resolve(&TagDescriptor::new("X"), &context()).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::MissingValue {
                key: "X".to_string()
            }
        );
    }

    #[test]
    fn test_prefix_applied_to_lookup() {
        let context = ResolutionContext::new()
            .with_prefix("APP_")
            .with_source(MapSource::with_values("environment", [("APP_PORT", "1")]));

        let resolved = resolve(&TagDescriptor::new("PORT"), &context).unwrap();
        assert_eq!(resolved.key(), "APP_PORT");
        assert_eq!(resolved.raw(), Some("1"));

        let resolved = resolve(&TagDescriptor::new("APP_PORT"), &context).unwrap();
        assert_eq!(resolved.key(), "APP_PORT");

        let err = resolve(&TagDescriptor::new("HOST"), &context).unwrap_err();
        assert_eq!(err.key(), "APP_HOST");
    }
}
