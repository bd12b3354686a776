//! envtag Test Utilities
//!
//! Shared test infrastructure for the envtag workspace:
//! - Proptest generators for tag descriptors and raw values
//! - Fixtures for value sources and resolution contexts
//! - Assertions over envtag error variants

// Re-export core types for convenience
pub use envtag_core::{
    CoercionTarget, ConversionError, EnvTagError, FieldError, Kind, MapSource, ParseError,
    ParseErrorKind, ResolutionContext, ResolutionError, TagDescriptor, ValueSource,
};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for tag descriptors and raw values.

    use super::*;
    use proptest::prelude::*;

    /// Generate an upper-case lookup key such as `DATABASE_URL`.
    pub fn arb_lookup_key() -> impl Strategy<Value = String> {
        "[A-Z][A-Z0-9_]{0,15}"
    }

    /// Generate a default that can be written without brackets.
    ///
    /// No structural characters, no surrounding whitespace.
    pub fn arb_plain_default() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_.:/|-]([a-zA-Z0-9_ .:/|-]{0,10}[a-zA-Z0-9_.:/|-])?"
    }

    /// Generate a default that needs brackets because it contains `,` or `=`.
    pub fn arb_escaped_default() -> impl Strategy<Value = String> {
        ("[a-z0-9|:]{0,6}", prop_oneof![Just(","), Just("=")], "[a-z0-9,=|:]{0,8}")
            .prop_map(|(head, sep, tail)| format!("{head}{sep}{tail}"))
    }

    /// Any default value the grammar can carry.
    pub fn arb_default() -> impl Strategy<Value = String> {
        prop_oneof![arb_plain_default(), arb_escaped_default()]
    }

    /// Generate a `split=` delimiter, including the structural ones.
    pub fn arb_delimiter() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(",".to_string()),
            Just("=".to_string()),
            Just("[".to_string()),
            Just("]".to_string()),
            Just("|".to_string()),
            "[;:#/|]{1,3}",
        ]
    }

    /// Generate an arbitrary, well-formed descriptor.
    pub fn arb_descriptor() -> impl Strategy<Value = TagDescriptor> {
        (
            arb_lookup_key(),
            any::<bool>(),
            proptest::option::of(arb_default()),
            proptest::option::of(arb_delimiter()),
        )
            .prop_map(|(lookup_key, optional, default_value, split_on)| TagDescriptor {
                lookup_key,
                optional,
                default_value,
                split_on,
            })
    }

    /// Generate a list of integers together with its `|`-joined raw form.
    pub fn arb_int_list() -> impl Strategy<Value = (Vec<i64>, String)> {
        prop::collection::vec(any::<i64>(), 1..8).prop_map(|items| {
            let raw = items
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("|");
            (items, raw)
        })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built sources and contexts for common scenarios.

    use super::*;

    /// In-memory source populated from `pairs`.
    pub fn map_source(name: &str, pairs: &[(&str, &str)]) -> MapSource {
        MapSource::with_values(name, pairs.iter().copied())
    }

    /// Context backed by a single in-memory source, isolated from the
    /// process environment.
    pub fn context_with(pairs: &[(&str, &str)]) -> ResolutionContext {
        ResolutionContext::new().with_source(map_source("test", pairs))
    }

    /// Context with a primary and a fallback source.
    pub fn layered_context(
        primary: &[(&str, &str)],
        fallback: &[(&str, &str)],
    ) -> ResolutionContext {
        ResolutionContext::new()
            .with_source(map_source("primary", primary))
            .with_source(map_source("fallback", fallback))
    }

    /// Descriptor using every option.
    pub fn full_descriptor() -> TagDescriptor {
        TagDescriptor::new("TEST")
            .optional()
            .with_default("10,20,30")
            .with_split(",")
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertion helpers for envtag-specific error variants.

    use super::*;

    /// Assert that a parse failed with the given kind.
    #[track_caller]
    pub fn assert_parse_kind<T: std::fmt::Debug>(
        result: &Result<T, ParseError>,
        expected: &ParseErrorKind,
    ) {
        match result {
            Err(err) if &err.kind == expected => {}
            other => panic!("Expected parse error {:?}, got: {:?}", expected, other),
        }
    }

    /// Assert that a field failed because its value was missing.
    #[track_caller]
    pub fn assert_missing_field<T: std::fmt::Debug>(result: &Result<T, FieldError>, field: &str) {
        match result {
            Err(FieldError {
                field: f,
                source: EnvTagError::Resolution(ResolutionError::MissingValue { .. }),
            }) if f == field => {}
            other => panic!("Expected missing value for {field}, got: {:?}", other),
        }
    }

    /// Assert that a field failed during conversion.
    #[track_caller]
    pub fn assert_conversion_field<T: std::fmt::Debug>(
        result: &Result<T, FieldError>,
        field: &str,
    ) {
        match result {
            Err(FieldError {
                field: f,
                source: EnvTagError::Conversion(_),
            }) if f == field => {}
            other => panic!("Expected conversion error for {field}, got: {:?}", other),
        }
    }
}
