//! Type coercion engine
//!
//! Every decodable type declares exactly one [`Coercion`] strategy:
//!
//! - **Raw**: native JSON primitives, matched against the node's tag
//! - **FromString**: types built from a string node ([`FromJsonString`])
//! - **Composite**: types built from a mapping node ([`FromMapping`])
//!
//! [`coerce`] matches on the strategy, so adding a family means every call
//! site is revisited by the compiler.

use jsonkp_core::{CoercionFailure, DecodeError, KeyPath, KeyPathLimits, Mapping, Result};
use serde_json::Value;

/// Conversion strategy declared by a target type
pub enum Coercion<T> {
    /// Accept the node if its tag matches; `None` means incorrect type
    Raw(fn(&Value) -> Option<T>),
    /// Build from a string node; `Err` carries the rejection message
    FromString(fn(&str) -> std::result::Result<T, String>),
    /// Build from a mapping node by decoding its fields
    Composite(fn(Mapping<'_>) -> Result<T>),
}

/// A type that can be extracted from a document node
pub trait Decode: Sized {
    /// The strategy used to convert a node into `Self`
    fn coercion() -> Coercion<Self>;
}

/// A type constructed from its string form
///
/// Register the type with [`decode_from_string!`](crate::decode_from_string).
pub trait FromJsonString: Sized {
    /// Parse `s`, returning a message on failure
    fn from_json_string(s: &str) -> std::result::Result<Self, String>;
}

/// A type constructed from a mapping node
///
/// Implementations read their fields through [`JsonPath`](crate::JsonPath) on
/// the mapping, so nested values go through the same engine. Register the
/// type with [`decode_from_mapping!`](crate::decode_from_mapping).
pub trait FromMapping: Sized {
    /// Build `Self` from the fields of `mapping`
    fn from_mapping(mapping: Mapping<'_>) -> Result<Self>;
}

/// Implement [`Decode`] for types that implement [`FromJsonString`]
#[macro_export]
macro_rules! decode_from_string {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Decode for $ty {
                fn coercion() -> $crate::Coercion<Self> {
                    $crate::Coercion::FromString(<$ty as $crate::FromJsonString>::from_json_string)
                }
            }
        )+
    };
}

/// Implement [`Decode`] for types that implement [`FromMapping`]
#[macro_export]
macro_rules! decode_from_mapping {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Decode for $ty {
                fn coercion() -> $crate::Coercion<Self> {
                    $crate::Coercion::Composite(<$ty as $crate::FromMapping>::from_mapping)
                }
            }
        )+
    };
}

/// Convert `node`, located at `context`, into `T` under default limits
pub fn coerce<T: Decode>(node: &Value, context: &KeyPath) -> std::result::Result<T, CoercionFailure> {
    coerce_with_limits(node, context, &KeyPathLimits::default())
}

/// Convert `node`, located at `context`, into `T`
///
/// Composite types see `limits` through their [`Mapping`] and apply them to
/// their own field lookups.
pub fn coerce_with_limits<T: Decode>(
    node: &Value,
    context: &KeyPath,
    limits: &KeyPathLimits,
) -> std::result::Result<T, CoercionFailure> {
    match T::coercion() {
        Coercion::Raw(from_raw) => {
            from_raw(node).ok_or_else(|| CoercionFailure::incorrect_type::<T>(context.clone(), node))
        }
        Coercion::FromString(parse) => {
            let Value::String(s) = node else {
                return Err(CoercionFailure::incorrect_type::<T>(context.clone(), node));
            };
            parse(s).map_err(|message| {
                CoercionFailure::conversion_failed::<T>(context.clone(), node, message)
            })
        }
        Coercion::Composite(build) => {
            let mapping = Mapping::with_limits(node, *limits)
                .ok_or_else(|| CoercionFailure::incorrect_type::<T>(context.clone(), node))?;
            build(mapping).map_err(|error| attribute_nested::<T>(error, context, node))
        }
    }
}

/// Map an error raised inside a composite decoder onto the outer path
///
/// Nested coercion failures keep their own location, placed under `context`.
/// Anything else is charged to the composite node itself.
fn attribute_nested<T>(error: DecodeError, context: &KeyPath, node: &Value) -> CoercionFailure {
    match error {
        DecodeError::Coercion(inner) => inner.rebased(context),
        DecodeError::Custom { message } => {
            CoercionFailure::conversion_failed::<T>(context.clone(), node, message)
        }
        other @ (DecodeError::MissingValue(_) | DecodeError::InvalidKeyPath(_)) => {
            tracing::debug!(
                path = %context,
                error = %other,
                "nested decode failed, reporting composite as incorrect type"
            );
            CoercionFailure::incorrect_type::<T>(context.clone(), node)
        }
    }
}
