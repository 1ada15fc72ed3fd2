//! Homogeneous collection decoding
//!
//! Sequences decode into `Vec<T>`, mappings into `BTreeMap<String, T>` or
//! `HashMap<String, T>`. Elements are converted one at a time in the
//! container's natural order and every failure goes through the
//! [`InvalidItemPolicy`].

use crate::coerce::{coerce_with_limits, Decode};
use crate::policy::InvalidItemPolicy;
use jsonkp_core::{CoercionFailure, KeyPath, KeyPathLimits};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A collection whose elements decode independently
pub trait DecodeCollection: Sized {
    /// Element type
    ///
    /// `Clone` is required because [`InvalidItemPolicy::Value`] places a copy
    /// of its substitute at every failed position, and the policy is chosen
    /// at run time.
    type Item: Decode + Clone;

    /// Decode the container at `path`, applying `policy` to failed elements
    ///
    /// Composite elements look up their fields under `limits`.
    fn decode_items(
        node: &Value,
        path: &KeyPath,
        policy: &InvalidItemPolicy<Self::Item>,
        limits: &KeyPathLimits,
    ) -> Result<Self, CoercionFailure>;
}

impl<T: Decode + Clone> DecodeCollection for Vec<T> {
    type Item = T;

    fn decode_items(
        node: &Value,
        path: &KeyPath,
        policy: &InvalidItemPolicy<T>,
        limits: &KeyPathLimits,
    ) -> Result<Self, CoercionFailure> {
        decode_sequence(node, path, policy, limits)
    }
}

impl<T: Decode + Clone> DecodeCollection for BTreeMap<String, T> {
    type Item = T;

    fn decode_items(
        node: &Value,
        path: &KeyPath,
        policy: &InvalidItemPolicy<T>,
        limits: &KeyPathLimits,
    ) -> Result<Self, CoercionFailure> {
        decode_entries(node, path, policy, limits)
    }
}

impl<T, S> DecodeCollection for HashMap<String, T, S>
where
    T: Decode + Clone,
    S: BuildHasher + Default,
{
    type Item = T;

    fn decode_items(
        node: &Value,
        path: &KeyPath,
        policy: &InvalidItemPolicy<T>,
        limits: &KeyPathLimits,
    ) -> Result<Self, CoercionFailure> {
        decode_entries(node, path, policy, limits)
    }
}

/// Decode every element of a sequence node
///
/// Element paths are the container path followed by the element index.
pub fn decode_sequence<T: Decode + Clone>(
    node: &Value,
    path: &KeyPath,
    policy: &InvalidItemPolicy<T>,
    limits: &KeyPathLimits,
) -> Result<Vec<T>, CoercionFailure> {
    let items = node
        .as_array()
        .ok_or_else(|| CoercionFailure::incorrect_type::<Vec<T>>(path.clone(), node))?;

    let mut decoded = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        if let Some(value) = decode_item(item, path.index(index), policy, limits)? {
            decoded.push(value);
        }
    }

    Ok(decoded)
}

/// Decode every value of a mapping node, keyed as in the source
///
/// Element paths are the container path followed by the entry key.
pub fn decode_entries<T, M>(
    node: &Value,
    path: &KeyPath,
    policy: &InvalidItemPolicy<T>,
    limits: &KeyPathLimits,
) -> Result<M, CoercionFailure>
where
    T: Decode + Clone,
    M: Default + Extend<(String, T)>,
{
    let entries = node
        .as_object()
        .ok_or_else(|| CoercionFailure::incorrect_type::<M>(path.clone(), node))?;

    let mut decoded = M::default();
    for (key, item) in entries {
        if let Some(value) = decode_item(item, path.child(key.as_str()), policy, limits)? {
            decoded.extend(std::iter::once((key.clone(), value)));
        }
    }

    Ok(decoded)
}

fn decode_item<T: Decode + Clone>(
    item: &Value,
    item_path: KeyPath,
    policy: &InvalidItemPolicy<T>,
    limits: &KeyPathLimits,
) -> Result<Option<T>, CoercionFailure> {
    match coerce_with_limits::<T>(item, &item_path, limits) {
        Ok(value) => Ok(Some(value)),
        Err(failure) => {
            if !matches!(policy, InvalidItemPolicy::Fail) {
                tracing::debug!(
                    path = %failure.key_path,
                    policy = policy.name(),
                    reason = %failure.reason,
                    found = %failure.found_kind(),
                    "invalid collection item"
                );
            }
            policy.recover(failure)
        }
    }
}
