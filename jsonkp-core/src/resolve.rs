//! Keypath navigation over a document tree

use crate::error::{ResolutionFailure, ResolutionReason};
use crate::keypath::KeyPath;
use crate::node::{Mapping, NodeKind};
use serde_json::{Map, Value};

/// Number of keys listed in a [`ResolutionFailure`] hint
const AVAILABLE_KEYS_SHOWN: usize = 10;

/// Walk `root` along `path`
///
/// Mapping nodes are entered by key, sequence nodes by a non-negative decimal
/// index. An empty path returns `root`. No type conversion happens here.
pub fn resolve<'a>(root: &'a Value, path: &KeyPath) -> Result<&'a Value, ResolutionFailure> {
    let mut current = root;

    for (idx, segment) in path.segments().iter().enumerate() {
        current = step(current, segment).map_err(|(reason, available)| {
            tracing::trace!(
                path = %path,
                segment = %segment,
                reason = %reason,
                "key path resolution stopped"
            );
            ResolutionFailure {
                failed_segment: segment.clone(),
                attempted_path: path.clone(),
                reached_path: path.prefix(idx),
                reason,
                available,
            }
        })?;
    }

    Ok(current)
}

/// Walk a [`Mapping`] along `path`
///
/// An empty path yields the mapping's own node.
pub fn resolve_in<'a>(
    mapping: Mapping<'a>,
    path: &KeyPath,
) -> Result<&'a Value, ResolutionFailure> {
    resolve(mapping.as_value(), path)
}

fn step<'a>(current: &'a Value, segment: &str) -> Result<&'a Value, (ResolutionReason, String)> {
    match current {
        Value::Object(map) => map
            .get(segment)
            .ok_or_else(|| (ResolutionReason::NotFound, describe_keys(map))),
        Value::Array(arr) => match segment.parse::<usize>() {
            Ok(index) => arr.get(index).ok_or_else(|| {
                (
                    ResolutionReason::NotFound,
                    format!("<array with {} elements>", arr.len()),
                )
            }),
            Err(_) => Err((
                ResolutionReason::NotFound,
                format!("<array with {} elements, expected numeric index>", arr.len()),
            )),
        },
        other => Err((
            ResolutionReason::WrongContainerKind,
            format!("<{}, cannot traverse further>", NodeKind::of(other)),
        )),
    }
}

fn describe_keys(map: &Map<String, Value>) -> String {
    let available: Vec<&str> = map
        .keys()
        .take(AVAILABLE_KEYS_SHOWN)
        .map(String::as_str)
        .collect();

    if map.len() > AVAILABLE_KEYS_SHOWN {
        format!("{}, ... ({} total)", available.join(", "), map.len())
    } else if available.is_empty() {
        "<empty object>".to_string()
    } else {
        available.join(", ")
    }
}
