//! Typed decode API

use crate::coerce::{coerce_with_limits, Decode};
use crate::collection::DecodeCollection;
use crate::policy::InvalidItemPolicy;
use jsonkp_core::{resolve, DecodeError, KeyPath, KeyPathError, KeyPathLimits, Result};
use serde_json::Value;

/// Entry point for keypath decoding
///
/// A `Decoder` only carries configuration. Every call is a pure function of
/// the document, keypath, target type and policy, so one decoder can be shared
/// freely between threads. Its limits also govern the field lookups of
/// composite types decoded through it.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    limits: KeyPathLimits,
}

impl Decoder {
    /// Create a decoder with validated limits
    pub fn new(limits: KeyPathLimits) -> std::result::Result<Self, KeyPathError> {
        limits.validate()?;
        Ok(Self { limits })
    }

    /// Decoder for limits that arrived through a [`Mapping`](jsonkp_core::Mapping)
    pub(crate) fn inherit(limits: KeyPathLimits) -> Self {
        Self { limits }
    }

    /// Configured keypath limits
    pub fn limits(&self) -> &KeyPathLimits {
        &self.limits
    }

    /// Parse `key_path` under this decoder's limits
    pub fn key_path(&self, key_path: &str) -> Result<KeyPath> {
        Ok(KeyPath::parse_with_limits(key_path, &self.limits)?)
    }

    /// Decode the scalar or composite value at `key_path`
    pub fn decode<T: Decode>(&self, document: &Value, key_path: &str) -> Result<T> {
        let path = self.key_path(key_path)?;
        self.decode_at(document, &path)
    }

    /// Like [`Decoder::decode`], but an absent or `null` value yields `None`
    pub fn decode_optional<T: Decode>(&self, document: &Value, key_path: &str) -> Result<Option<T>> {
        let path = self.key_path(key_path)?;
        match resolve_present(document, &path) {
            Some(node) => Ok(Some(
                coerce_with_limits(node, &path, &self.limits).map_err(log_failure)?,
            )),
            None => Ok(None),
        }
    }

    /// Decode the collection at `key_path`, applying `policy` to invalid elements
    pub fn decode_collection<C: DecodeCollection>(
        &self,
        document: &Value,
        key_path: &str,
        policy: InvalidItemPolicy<C::Item>,
    ) -> Result<C> {
        let path = self.key_path(key_path)?;
        self.decode_collection_at(document, &path, &policy)
    }

    /// Like [`Decoder::decode_collection`], but an absent or `null` container
    /// yields `None`
    pub fn decode_collection_optional<C: DecodeCollection>(
        &self,
        document: &Value,
        key_path: &str,
        policy: InvalidItemPolicy<C::Item>,
    ) -> Result<Option<C>> {
        let path = self.key_path(key_path)?;
        match resolve_present(document, &path) {
            Some(node) => Ok(Some(
                C::decode_items(node, &path, &policy, &self.limits).map_err(log_failure)?,
            )),
            None => Ok(None),
        }
    }

    /// Decode the value at an already-parsed keypath
    pub fn decode_at<T: Decode>(&self, document: &Value, path: &KeyPath) -> Result<T> {
        let node = resolve(document, path).map_err(log_failure)?;
        coerce_with_limits(node, path, &self.limits).map_err(log_failure)
    }

    /// Decode the collection at an already-parsed keypath
    pub fn decode_collection_at<C: DecodeCollection>(
        &self,
        document: &Value,
        path: &KeyPath,
        policy: &InvalidItemPolicy<C::Item>,
    ) -> Result<C> {
        let node = resolve(document, path).map_err(log_failure)?;
        C::decode_items(node, path, policy, &self.limits).map_err(log_failure)
    }
}

/// Decode the value at an already-parsed keypath with default limits
pub fn decode_at<T: Decode>(document: &Value, path: &KeyPath) -> Result<T> {
    Decoder::default().decode_at(document, path)
}

/// Decode the collection at an already-parsed keypath with default limits
pub fn decode_collection_at<C: DecodeCollection>(
    document: &Value,
    path: &KeyPath,
    policy: &InvalidItemPolicy<C::Item>,
) -> Result<C> {
    Decoder::default().decode_collection_at(document, path, policy)
}

/// Decode the value at `key_path` with default limits
pub fn decode<T: Decode>(document: &Value, key_path: &str) -> Result<T> {
    Decoder::default().decode(document, key_path)
}

/// Decode the optional value at `key_path` with default limits
pub fn decode_optional<T: Decode>(document: &Value, key_path: &str) -> Result<Option<T>> {
    Decoder::default().decode_optional(document, key_path)
}

/// Decode the collection at `key_path` with default limits
pub fn decode_collection<C: DecodeCollection>(
    document: &Value,
    key_path: &str,
    policy: InvalidItemPolicy<C::Item>,
) -> Result<C> {
    Decoder::default().decode_collection(document, key_path, policy)
}

/// Decode the optional collection at `key_path` with default limits
pub fn decode_collection_optional<C: DecodeCollection>(
    document: &Value,
    key_path: &str,
    policy: InvalidItemPolicy<C::Item>,
) -> Result<Option<C>> {
    Decoder::default().decode_collection_optional(document, key_path, policy)
}

fn resolve_present<'a>(document: &'a Value, path: &KeyPath) -> Option<&'a Value> {
    match resolve(document, path) {
        Ok(Value::Null) | Err(_) => None,
        Ok(node) => Some(node),
    }
}

fn log_failure(error: impl Into<DecodeError>) -> DecodeError {
    let error = error.into();
    let path = error.key_path().map(ToString::to_string).unwrap_or_default();
    tracing::debug!(
        path = %path,
        error = %error,
        "decode failed"
    );
    error
}
