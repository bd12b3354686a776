//! Typed values and their mapping onto Rust field types

use crate::coerce::coerce_scalar;
use crate::error::ConversionError;
use crate::{CoercionTarget, Kind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// A single coerced value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Scalar {
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::String(_) => Kind::String,
            Scalar::Integer(_) => Kind::Integer,
            Scalar::Float(_) => Kind::Float,
            Scalar::Boolean(_) => Kind::Boolean,
        }
    }
}

/// Output of the coercion engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedValue {
    Scalar(Scalar),
    /// Elements in source order.
    List(Vec<Scalar>),
    /// Unique keys; each key sits where it first appeared and holds its last value.
    Map(Vec<(Scalar, Scalar)>),
}

// ============================================================================
// FIELD TYPE MAPPING
// ============================================================================

/// Rust types that map onto a single [`Kind`].
pub trait EnvScalar: Sized {
    fn kind() -> Kind;

    fn from_scalar(scalar: Scalar) -> Result<Self, ConversionError>;
}

/// Rust types a field may have.
///
/// `Default` supplies the zero value written for absent optional fields.
pub trait EnvValue: Sized + Default {
    fn target() -> CoercionTarget;

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError>;
}

fn mismatch(expected: Kind) -> ConversionError {
    ConversionError::ShapeMismatch {
        expected: expected.to_string(),
    }
}

impl EnvScalar for String {
    fn kind() -> Kind {
        Kind::String
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ConversionError> {
        match scalar {
            Scalar::String(s) => Ok(s),
            _ => Err(mismatch(Kind::String)),
        }
    }
}

impl EnvScalar for bool {
    fn kind() -> Kind {
        Kind::Boolean
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ConversionError> {
        match scalar {
            Scalar::Boolean(b) => Ok(b),
            _ => Err(mismatch(Kind::Boolean)),
        }
    }
}

impl EnvScalar for f64 {
    fn kind() -> Kind {
        Kind::Float
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ConversionError> {
        match scalar {
            Scalar::Float(f) => Ok(f),
            _ => Err(mismatch(Kind::Float)),
        }
    }
}

impl EnvScalar for f32 {
    fn kind() -> Kind {
        Kind::Float
    }

    fn from_scalar(scalar: Scalar) -> Result<Self, ConversionError> {
        let value = f64::from_scalar(scalar)?;
        if value.is_finite() && value.abs() > f64::from(f32::MAX) {
            return Err(ConversionError::OutOfRange {
                value: value.to_string(),
                type_name: "f32",
            });
        }
        Ok(value as f32)
    }
}

macro_rules! impl_env_scalar_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvScalar for $ty {
                fn kind() -> Kind {
                    Kind::Integer
                }

                fn from_scalar(scalar: Scalar) -> Result<Self, ConversionError> {
                    match scalar {
                        Scalar::Integer(i) => <$ty>::try_from(i).map_err(|_| {
                            ConversionError::OutOfRange {
                                value: i.to_string(),
                                type_name: stringify!($ty),
                            }
                        }),
                        _ => Err(mismatch(Kind::Integer)),
                    }
                }
            }
        )*
    };
}

impl_env_scalar_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_env_value_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EnvValue for $ty {
                fn target() -> CoercionTarget {
                    CoercionTarget::Scalar(<$ty as EnvScalar>::kind())
                }

                fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
                    match value {
                        TypedValue::Scalar(scalar) => <$ty as EnvScalar>::from_scalar(scalar),
                        _ => Err(mismatch(<$ty as EnvScalar>::kind())),
                    }
                }
            }
        )*
    };
}

impl_env_value_scalar!(
    String, bool, f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize
);

impl<T: EnvScalar> EnvValue for Vec<T> {
    fn target() -> CoercionTarget {
        CoercionTarget::List(T::kind())
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    T::from_scalar(item).map_err(|err| ConversionError::InvalidElement {
                        index,
                        source: Box::new(err),
                    })
                })
                .collect(),
            _ => Err(ConversionError::ShapeMismatch {
                expected: Self::target().to_string(),
            }),
        }
    }
}

/// Convert map entries pairwise, reporting the offending key on failure.
fn convert_entries<K: EnvScalar, V: EnvScalar>(
    entries: Vec<(Scalar, Scalar)>,
) -> Result<Vec<(K, V)>, ConversionError> {
    entries
        .into_iter()
        .map(|(key, value)| {
            let label = scalar_label(&key);
            let key = K::from_scalar(key).map_err(|err| ConversionError::InvalidKey {
                key: label.clone(),
                source: Box::new(err),
            })?;
            let value = V::from_scalar(value).map_err(|err| ConversionError::InvalidValue {
                key: label,
                source: Box::new(err),
            })?;
            Ok((key, value))
        })
        .collect()
}

fn scalar_label(scalar: &Scalar) -> String {
    match scalar {
        Scalar::String(s) => s.clone(),
        Scalar::Integer(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Boolean(b) => b.to_string(),
    }
}

impl<K, V> EnvValue for HashMap<K, V>
where
    K: EnvScalar + Eq + Hash,
    V: EnvScalar,
{
    fn target() -> CoercionTarget {
        CoercionTarget::Map(K::kind(), V::kind())
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Map(entries) => Ok(convert_entries(entries)?.into_iter().collect()),
            _ => Err(ConversionError::ShapeMismatch {
                expected: Self::target().to_string(),
            }),
        }
    }
}

impl<K, V> EnvValue for BTreeMap<K, V>
where
    K: EnvScalar + Ord,
    V: EnvScalar,
{
    fn target() -> CoercionTarget {
        CoercionTarget::Map(K::kind(), V::kind())
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        match value {
            TypedValue::Map(entries) => Ok(convert_entries(entries)?.into_iter().collect()),
            _ => Err(ConversionError::ShapeMismatch {
                expected: Self::target().to_string(),
            }),
        }
    }
}

/// `None` when the optional value is absent, otherwise the inner type's value.
impl<T: EnvValue> EnvValue for Option<T> {
    fn target() -> CoercionTarget {
        T::target()
    }

    fn from_typed(value: TypedValue) -> Result<Self, ConversionError> {
        T::from_typed(value).map(Some)
    }
}

/// Coerce a single raw string straight into a field type.
///
/// Convenience for callers that hold a raw value without a descriptor.
pub fn parse_as<T: EnvValue>(raw: &str, split_on: Option<&str>) -> Result<T, ConversionError> {
    let typed = crate::coerce::coerce(raw, &T::target(), split_on)?;
    T::from_typed(typed)
}

/// Coerce one raw scalar into `T`.
pub fn parse_scalar<T: EnvScalar>(raw: &str) -> Result<T, ConversionError> {
    T::from_scalar(coerce_scalar(raw, T::kind())?)
}

// =============================================================================
// TESTS
// =============================================================================
