//! Type coercion engine
//!
//! Converts a resolved raw string into a [`TypedValue`] of the requested
//! shape. Lists and maps split on the tag's delimiter (or [`DEFAULT_SPLIT`]);
//! elements are coerced verbatim, without trimming.

use crate::error::ConversionError;
use crate::value::{Scalar, TypedValue};
use crate::{CoercionTarget, Kind, DEFAULT_SPLIT, MAP_ENTRY_SEPARATOR};

/// Coerce `raw` into `target`.
///
/// `split_on` is the tag's delimiter and only matters for collection targets.
/// An empty `raw` becomes an empty collection.
pub fn coerce(
    raw: &str,
    target: &CoercionTarget,
    split_on: Option<&str>,
) -> Result<TypedValue, ConversionError> {
    let delimiter = match split_on {
        Some(d) if !d.is_empty() => d,
        _ => DEFAULT_SPLIT,
    };

    match target {
        CoercionTarget::Scalar(kind) => coerce_scalar(raw, *kind).map(TypedValue::Scalar),
        CoercionTarget::List(kind) => coerce_list(raw, *kind, delimiter).map(TypedValue::List),
        CoercionTarget::Map(key_kind, value_kind) => {
            coerce_map(raw, *key_kind, *value_kind, delimiter).map(TypedValue::Map)
        }
        CoercionTarget::Unsupported(type_name) => Err(ConversionError::UnsupportedType {
            type_name: type_name.clone(),
        }),
    }
}

/// Coerce one raw literal into a scalar of `kind`.
pub fn coerce_scalar(raw: &str, kind: Kind) -> Result<Scalar, ConversionError> {
    let invalid = |reason: String| ConversionError::InvalidScalar {
        kind,
        value: raw.to_string(),
        reason,
    };

    match kind {
        Kind::String => Ok(Scalar::String(raw.to_string())),
        Kind::Integer => raw
            .parse::<i64>()
            .map(Scalar::Integer)
            .map_err(|e| invalid(e.to_string())),
        Kind::Float => raw
            .parse::<f64>()
            .map(Scalar::Float)
            .map_err(|e| invalid(e.to_string())),
        Kind::Boolean => parse_bool(raw)
            .map(Scalar::Boolean)
            .ok_or_else(|| invalid("expected true, false, 1 or 0".to_string())),
    }
}

/// `true`/`false` in any ASCII case, or `1`/`0`.
fn parse_bool(raw: &str) -> Option<bool> {
    if raw == "1" || raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw == "0" || raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn coerce_list(raw: &str, kind: Kind, delimiter: &str) -> Result<Vec<Scalar>, ConversionError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    raw.split(delimiter)
        .enumerate()
        .map(|(index, element)| {
            coerce_scalar(element, kind).map_err(|err| ConversionError::InvalidElement {
                index,
                source: Box::new(err),
            })
        })
        .collect()
}

fn coerce_map(
    raw: &str,
    key_kind: Kind,
    value_kind: Kind,
    delimiter: &str,
) -> Result<Vec<(Scalar, Scalar)>, ConversionError> {
    let mut entries: Vec<(Scalar, Scalar)> = Vec::new();
    if raw.is_empty() {
        return Ok(entries);
    }

    for (index, entry) in raw.split(delimiter).enumerate() {
        let (raw_key, raw_value) =
            entry
                .split_once(MAP_ENTRY_SEPARATOR)
                .ok_or_else(|| ConversionError::MalformedEntry {
                    index,
                    entry: entry.to_string(),
                    separator: MAP_ENTRY_SEPARATOR,
                })?;

        let key = coerce_scalar(raw_key, key_kind).map_err(|err| ConversionError::InvalidKey {
            key: raw_key.to_string(),
            source: Box::new(err),
        })?;
        let value =
            coerce_scalar(raw_value, value_kind).map_err(|err| ConversionError::InvalidValue {
                key: raw_key.to_string(),
                source: Box::new(err),
            })?;

        // Last wins, but the key keeps the slot of its first occurrence.
        match entries.iter_mut().find(|(existing, _)| same_key(existing, &key)) {
            Some(slot) => slot.1 = value,
            None => entries.push((key, value)),
        }
    }

    Ok(entries)
}

/// Key equality for map deduplication; every NaN is the same key.
fn same_key(a: &Scalar, b: &Scalar) -> bool {
    match (a, b) {
        (Scalar::Float(a), Scalar::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
        _ => a == b,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> Scalar {
        Scalar::String(value.to_string())
    }

    #[test]
    fn test_string_is_identity() {
        let value = coerce(" spaced value ", &CoercionTarget::Scalar(Kind::String), None).unwrap();
        assert_eq!(value, TypedValue::Scalar(s(" spaced value ")));
    }

    #[test]
    fn test_integer_scalar() {
        let value = coerce("8080", &CoercionTarget::Scalar(Kind::Integer), None).unwrap();
        assert_eq!(value, TypedValue::Scalar(Scalar::Integer(8080)));
        let value = coerce("-42", &CoercionTarget::Scalar(Kind::Integer), None).unwrap();
        assert_eq!(value, TypedValue::Scalar(Scalar::Integer(-42)));
    }

    #[test]
    fn test_integer_rejects_garbage_and_overflow() {
        let err = coerce("test-value", &CoercionTarget::Scalar(Kind::Integer), None).unwrap_err();
        match err {
            ConversionError::InvalidScalar { kind, value, .. } => {
                assert_eq!(kind, Kind::Integer);
                assert_eq!(value, "test-value");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = coerce(
            "9223372036854775808",
            &CoercionTarget::Scalar(Kind::Integer),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("9223372036854775808"));
    }

    #[test]
    fn test_float_scalar() {
        let value = coerce("34.3243", &CoercionTarget::Scalar(Kind::Float), None).unwrap();
        assert_eq!(value, TypedValue::Scalar(Scalar::Float(34.3243)));
        assert!(coerce("1.2.3", &CoercionTarget::Scalar(Kind::Float), None).is_err());
    }

    #[test]
    fn test_boolean_literals() {
        for raw in ["true", "TRUE", "True", "1"] {
            assert_eq!(coerce_scalar(raw, Kind::Boolean).unwrap(), Scalar::Boolean(true));
        }
        for raw in ["false", "FALSE", "False", "0"] {
            assert_eq!(coerce_scalar(raw, Kind::Boolean).unwrap(), Scalar::Boolean(false));
        }
        for raw in ["yes", "t", "", " true"] {
            assert!(coerce_scalar(raw, Kind::Boolean).is_err(), "{raw:?} accepted");
        }
    }

    #[test]
    fn test_list_preserves_split_order() {
        let value = coerce("3|1|2", &CoercionTarget::List(Kind::Integer), Some("|")).unwrap();
        assert_eq!(
            value,
            TypedValue::List(vec![
                Scalar::Integer(3),
                Scalar::Integer(1),
                Scalar::Integer(2)
            ])
        );
    }

    #[test]
    fn test_list_uses_default_delimiter() {
        let value = coerce("a|b", &CoercionTarget::List(Kind::String), None).unwrap();
        assert_eq!(value, TypedValue::List(vec![s("a"), s("b")]));
    }

    #[test]
    fn test_list_with_multi_char_delimiter() {
        let value = coerce("a::b::c", &CoercionTarget::List(Kind::String), Some("::")).unwrap();
        assert_eq!(value, TypedValue::List(vec![s("a"), s("b"), s("c")]));
    }

    #[test]
    fn test_list_reports_failing_index() {
        let err = coerce("1,2,x,4", &CoercionTarget::List(Kind::Integer), Some(",")).unwrap_err();
        match err {
            ConversionError::InvalidElement { index, source } => {
                assert_eq!(index, 2);
                assert!(source.to_string().contains("\"x\""));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_raw_is_empty_collection() {
        assert_eq!(
            coerce("", &CoercionTarget::List(Kind::Integer), None).unwrap(),
            TypedValue::List(vec![])
        );
        assert_eq!(
            coerce("", &CoercionTarget::Map(Kind::String, Kind::String), None).unwrap(),
            TypedValue::Map(vec![])
        );
    }

    #[test]
    fn test_map_last_key_wins() {
        let value = coerce(
            "a:1|b:2|a:3",
            &CoercionTarget::Map(Kind::String, Kind::Integer),
            None,
        )
        .unwrap();
        assert_eq!(
            value,
            TypedValue::Map(vec![
                (s("a"), Scalar::Integer(3)),
                (s("b"), Scalar::Integer(2)),
            ])
        );
    }

    #[test]
    fn test_map_nan_keys_collapse() {
        let value = coerce(
            "nan:1|NaN:2",
            &CoercionTarget::Map(Kind::Float, Kind::Integer),
            None,
        )
        .unwrap();
        let TypedValue::Map(entries) = value else {
            panic!("expected map");
        };
        assert_eq!(entries.len(), 1);
        assert!(matches!(entries[0].0, Scalar::Float(key) if key.is_nan()));
        assert_eq!(entries[0].1, Scalar::Integer(2));
    }

    #[test]
    fn test_map_splits_entry_once() {
        let value = coerce(
            "url:http://host:80",
            &CoercionTarget::Map(Kind::String, Kind::String),
            None,
        )
        .unwrap();
        assert_eq!(value, TypedValue::Map(vec![(s("url"), s("http://host:80"))]));
    }

    #[test]
    fn test_map_malformed_entry() {
        let err = coerce(
            "a:1,broken",
            &CoercionTarget::Map(Kind::String, Kind::Integer),
            Some(","),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConversionError::MalformedEntry {
                index: 1,
                entry: "broken".to_string(),
                separator: ':',
            }
        );
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_map_key_and_value_errors_carry_key() {
        let err = coerce(
            "x:1",
            &CoercionTarget::Map(Kind::Integer, Kind::Integer),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConversionError::InvalidKey { ref key, .. } if key == "x"));

        let err = coerce(
            "a:true|b:maybe",
            &CoercionTarget::Map(Kind::String, Kind::Boolean),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConversionError::InvalidValue { ref key, .. } if key == "b"));
    }

    #[test]
    fn test_unsupported_target() {
        let err = coerce(
            "test-value",
            &CoercionTarget::Unsupported("Vec<Vec<String>>".to_string()),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported type"));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_integer_scalars_round_trip(value in any::<i64>()) {
                let scalar = coerce_scalar(&value.to_string(), Kind::Integer).unwrap();
                prop_assert_eq!(scalar, Scalar::Integer(value));
            }

            #[test]
            fn prop_list_keeps_order_and_length(items in prop::collection::vec(any::<i64>(), 1..16)) {
                let raw = items.iter().map(i64::to_string).collect::<Vec<_>>().join(DEFAULT_SPLIT);
                let value = coerce(&raw, &CoercionTarget::List(Kind::Integer), None).unwrap();
                let expected = items.into_iter().map(Scalar::Integer).collect();
                prop_assert_eq!(value, TypedValue::List(expected));
            }

            #[test]
            fn prop_map_keys_are_unique(keys in prop::collection::vec("[a-c]", 1..12)) {
                let raw = keys
                    .iter()
                    .enumerate()
                    .map(|(i, k)| format!("{k}:{i}"))
                    .collect::<Vec<_>>()
                    .join("|");
                let value = coerce(&raw, &CoercionTarget::Map(Kind::String, Kind::Integer), None).unwrap();
                let TypedValue::Map(entries) = value else {
                    return Err(TestCaseError::fail("expected map"));
                };
                for (index, (key, _)) in entries.iter().enumerate() {
                    prop_assert!(!entries[index + 1..].iter().any(|(other, _)| other == key));
                }
            }
        }
    }
}
