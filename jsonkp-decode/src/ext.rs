//! Keypath accessors on documents and mappings

use crate::coerce::Decode;
use crate::collection::DecodeCollection;
use crate::decoder::Decoder;
use crate::policy::InvalidItemPolicy;
use jsonkp_core::{Mapping, Result};
use serde_json::Value;

/// Typed keypath access
///
/// On a [`Value`] lookups use default limits; use a [`Decoder`] to configure
/// them. On a [`Mapping`] lookups use the limits the mapping carries, which
/// are those of the decode that reached it. Inside a
/// [`FromMapping`](crate::FromMapping) implementation this is how fields are
/// read:
///
/// ```
/// use jsonkp_decode::{FromMapping, JsonPath, Mapping, Result};
///
/// struct User {
///     name: String,
///     tags: Vec<String>,
/// }
///
/// impl FromMapping for User {
///     fn from_mapping(mapping: Mapping<'_>) -> Result<Self> {
///         Ok(Self {
///             name: mapping.json("name")?,
///             tags: mapping.json_collection("tags", Default::default())?,
///         })
///     }
/// }
///
/// jsonkp_decode::decode_from_mapping!(User);
///
/// let doc = serde_json::json!({"user": {"name": "john", "tags": ["a", 1, "b"]}});
/// let user: User = doc.json("user").unwrap();
/// assert_eq!(user.name, "john");
/// assert_eq!(user.tags, vec!["a", "b"]);
/// ```
pub trait JsonPath {
    /// Decode the value at `key_path`
    fn json<T: Decode>(&self, key_path: &str) -> Result<T>;

    /// Decode the value at `key_path`, or `None` if absent or `null`
    fn json_optional<T: Decode>(&self, key_path: &str) -> Result<Option<T>>;

    /// Decode the collection at `key_path`
    fn json_collection<C: DecodeCollection>(
        &self,
        key_path: &str,
        policy: InvalidItemPolicy<C::Item>,
    ) -> Result<C>;

    /// Decode the collection at `key_path`, or `None` if absent or `null`
    fn json_collection_optional<C: DecodeCollection>(
        &self,
        key_path: &str,
        policy: InvalidItemPolicy<C::Item>,
    ) -> Result<Option<C>>;
}

impl JsonPath for Value {
    fn json<T: Decode>(&self, key_path: &str) -> Result<T> {
        Decoder::default().decode(self, key_path)
    }

    fn json_optional<T: Decode>(&self, key_path: &str) -> Result<Option<T>> {
        Decoder::default().decode_optional(self, key_path)
    }

    fn json_collection<C: DecodeCollection>(
        &self,
        key_path: &str,
        policy: InvalidItemPolicy<C::Item>,
    ) -> Result<C> {
        Decoder::default().decode_collection(self, key_path, policy)
    }

    fn json_collection_optional<C: DecodeCollection>(
        &self,
        key_path: &str,
        policy: InvalidItemPolicy<C::Item>,
    ) -> Result<Option<C>> {
        Decoder::default().decode_collection_optional(self, key_path, policy)
    }
}

impl JsonPath for Mapping<'_> {
    fn json<T: Decode>(&self, key_path: &str) -> Result<T> {
        Decoder::inherit(*self.limits()).decode(self.as_value(), key_path)
    }

    fn json_optional<T: Decode>(&self, key_path: &str) -> Result<Option<T>> {
        Decoder::inherit(*self.limits()).decode_optional(self.as_value(), key_path)
    }

    fn json_collection<C: DecodeCollection>(
        &self,
        key_path: &str,
        policy: InvalidItemPolicy<C::Item>,
    ) -> Result<C> {
        Decoder::inherit(*self.limits()).decode_collection(self.as_value(), key_path, policy)
    }

    fn json_collection_optional<C: DecodeCollection>(
        &self,
        key_path: &str,
        policy: InvalidItemPolicy<C::Item>,
    ) -> Result<Option<C>> {
        Decoder::inherit(*self.limits()).decode_collection_optional(
            self.as_value(),
            key_path,
            policy,
        )
    }
}
