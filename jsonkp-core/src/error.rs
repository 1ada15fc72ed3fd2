//! Error types for keypath decoding

use crate::keypath::KeyPath;
use crate::node::NodeKind;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Errors raised while parsing a keypath or validating [`KeyPathLimits`](crate::KeyPathLimits)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyPathError {
    /// Keypath string exceeds the configured length
    #[error(
        "Key path too long: {length} bytes (max: {max_length}).\n\
         \n\
         This limit prevents malicious inputs. Raise max_path_length if the path is legitimate."
    )]
    TooLong {
        /// The keypath that exceeded the limit
        path: String,
        /// Actual length (bytes)
        length: usize,
        /// Maximum length allowed (bytes)
        max_length: usize,
    },

    /// Keypath has more segments than allowed
    #[error("Key path too deep: '{path}' has {depth} segments (max: {max_depth}).")]
    TooDeep {
        /// The keypath that exceeded the limit
        path: String,
        /// Number of segments
        depth: usize,
        /// Maximum number of segments allowed
        max_depth: usize,
    },

    /// A segment between separators is empty
    #[error(
        "Invalid key path '{path}': segment {position} is empty.\n\
         \n\
         Key paths are dot-separated keys or array indices, e.g. 'data.users.0.name'.\n\
         Leading, trailing and doubled dots are not allowed."
    )]
    EmptySegment {
        /// The invalid keypath
        path: String,
        /// Zero-based position of the empty segment
        position: usize,
    },

    /// Configuration exceeds hard limits
    #[error(
        "Configuration exceeds hard limits: {reason}\n\
         \n\
         Hard limits:\n\
         - max_depth: {max_depth}\n\
         - max_path_length: {max_path_length} bytes"
    )]
    LimitsExceedHardMaximum {
        /// Description of which limit was exceeded
        reason: String,
        /// Hard maximum depth
        max_depth: usize,
        /// Hard maximum keypath length (bytes)
        max_path_length: usize,
    },
}

/// Why keypath navigation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionReason {
    /// The container has no such key, or the index is absent or out of bounds
    NotFound,
    /// Segments remain but the current node is a scalar
    WrongContainerKind,
}

impl fmt::Display for ResolutionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionReason::NotFound => f.write_str("not found"),
            ResolutionReason::WrongContainerKind => f.write_str("cannot traverse a scalar"),
        }
    }
}

/// Keypath navigation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "Key '{failed_segment}' {reason} while resolving '{attempted_path}'.\n\
     \n\
     Reached: '{reached_path}'\n\
     Available at this level: {available}"
)]
pub struct ResolutionFailure {
    /// Segment that could not be followed
    pub failed_segment: String,
    /// Full keypath being resolved
    pub attempted_path: KeyPath,
    /// Prefix navigated successfully before the failure
    pub reached_path: KeyPath,
    /// Why navigation stopped
    pub reason: ResolutionReason,
    /// Short description of what the failing level holds
    pub available: String,
}

/// Why a node could not be converted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoercionReason {
    /// The node's kind does not match the target type
    IncorrectType,
    /// The node had the right kind but the type's own conversion rejected it
    CustomConversionFailed(String),
}

impl fmt::Display for CoercionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoercionReason::IncorrectType => f.write_str("incorrect type"),
            CoercionReason::CustomConversionFailed(message) => {
                write!(f, "conversion failed ({})", message)
            }
        }
    }
}

/// Value-level conversion failure
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "Cannot decode '{key_path}': {reason}.\n\
     \n\
     Expected: {expected_type}\n\
     Found: {} {}",
    NodeKind::of(.value),
    .value
)]
pub struct CoercionFailure {
    /// Full keypath of the failing value
    pub key_path: KeyPath,
    /// The node that failed to convert
    pub value: Value,
    /// Name of the target type, without module paths
    pub expected_type: String,
    /// Why conversion failed
    pub reason: CoercionReason,
}

impl CoercionFailure {
    /// An [`CoercionReason::IncorrectType`] failure for target type `T`
    pub fn incorrect_type<T: ?Sized>(key_path: KeyPath, value: &Value) -> Self {
        Self {
            key_path,
            value: value.clone(),
            expected_type: short_type_name::<T>(),
            reason: CoercionReason::IncorrectType,
        }
    }

    /// A [`CoercionReason::CustomConversionFailed`] failure for target type `T`
    pub fn conversion_failed<T: ?Sized>(
        key_path: KeyPath,
        value: &Value,
        message: impl Into<String>,
    ) -> Self {
        Self {
            key_path,
            value: value.clone(),
            expected_type: short_type_name::<T>(),
            reason: CoercionReason::CustomConversionFailed(message.into()),
        }
    }

    /// Kind of the failing node
    pub fn found_kind(&self) -> NodeKind {
        NodeKind::of(&self.value)
    }

    /// The failing node rendered as text, with strings left unquoted
    pub fn raw_value_string(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Same failure with its keypath placed under `prefix`
    pub fn rebased(mut self, prefix: &KeyPath) -> Self {
        self.key_path = prefix.join(&self.key_path);
        self
    }
}

/// `type_name` of `T` with module paths dropped, e.g. `Vec<String>` rather
/// than `alloc::vec::Vec<alloc::string::String>`
fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut short = String::with_capacity(full.len());
    let mut segment_start = 0;

    for (idx, c) in full.char_indices() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            continue;
        }
        short.push_str(last_path_segment(&full[segment_start..idx]));
        short.push(c);
        segment_start = idx + c.len_utf8();
    }
    short.push_str(last_path_segment(&full[segment_start..]));
    short
}

fn last_path_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Top-level decode error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The keypath string is malformed or exceeds limits
    #[error("Invalid key path: {0}")]
    InvalidKeyPath(#[from] KeyPathError),

    /// Nothing exists at the keypath
    #[error("Missing value: {0}")]
    MissingValue(#[from] ResolutionFailure),

    /// A value exists but could not be converted
    #[error("Incorrect value: {0}")]
    Coercion(#[from] CoercionFailure),

    /// Raised by a composite type's own decode routine
    #[error("Decode failed: {message}")]
    Custom {
        /// Description supplied by the composite type
        message: String,
    },
}

impl DecodeError {
    /// A custom error for use inside composite decoders
    pub fn custom(message: impl Into<String>) -> Self {
        DecodeError::Custom {
            message: message.into(),
        }
    }

    /// Keypath the error points at, when it has one
    pub fn key_path(&self) -> Option<&KeyPath> {
        match self {
            DecodeError::InvalidKeyPath(_) | DecodeError::Custom { .. } => None,
            DecodeError::MissingValue(failure) => Some(&failure.attempted_path),
            DecodeError::Coercion(failure) => Some(&failure.key_path),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn raw_value_string_leaves_strings_bare() {
        let path = KeyPath::parse("key.0").unwrap();
        let failure = CoercionFailure::incorrect_type::<i64>(path.clone(), &json!("abc"));
        assert_eq!(failure.raw_value_string(), "abc");

        let failure = CoercionFailure::incorrect_type::<String>(path, &json!(2));
        assert_eq!(failure.raw_value_string(), "2");
        assert_eq!(failure.found_kind(), NodeKind::Number);
    }

    #[test]
    fn rebased_prefixes_path() {
        let inner = CoercionFailure::incorrect_type::<String>(
            KeyPath::parse("name").unwrap(),
            &json!(3),
        );
        let outer = inner.rebased(&KeyPath::parse("key.key1").unwrap());
        assert_eq!(outer.key_path.to_string(), "key.key1.name");
        assert_eq!(outer.reason, CoercionReason::IncorrectType);
    }

    #[test]
    fn coercion_message_names_path_and_kind() {
        let failure = CoercionFailure::incorrect_type::<String>(
            KeyPath::parse("key.key2").unwrap(),
            &json!(2),
        );
        let message = failure.to_string();
        assert!(message.contains("'key.key2'"));
        assert!(message.contains("incorrect type"));
        assert!(message.contains("Found: number 2"));
    }

    #[test]
    fn expected_type_drops_module_paths() {
        let path = KeyPath::parse("key").unwrap();
        let failure = CoercionFailure::incorrect_type::<String>(path.clone(), &json!(2));
        assert_eq!(failure.expected_type, "String");
        assert!(failure.to_string().contains("Expected: String\n"));

        let failure = CoercionFailure::incorrect_type::<Vec<String>>(path.clone(), &json!(2));
        assert_eq!(failure.expected_type, "Vec<String>");

        let failure = CoercionFailure::incorrect_type::<Option<u8>>(path.clone(), &json!(2));
        assert_eq!(failure.expected_type, "Option<u8>");

        let failure = CoercionFailure::conversion_failed::<(i64, &str)>(path, &json!(2), "bad");
        assert_eq!(failure.expected_type, "(i64, &str)");
    }

    #[test]
    fn decode_error_key_path() {
        let failure = ResolutionFailure {
            failed_segment: "b".to_string(),
            attempted_path: KeyPath::parse("a.b").unwrap(),
            reached_path: KeyPath::parse("a").unwrap(),
            reason: ResolutionReason::NotFound,
            available: "x, y".to_string(),
        };
        let error = DecodeError::from(failure);
        assert_eq!(error.key_path().map(ToString::to_string), Some("a.b".to_string()));
        assert!(error.to_string().contains("Key 'b' not found"));

        assert!(DecodeError::custom("bad").key_path().is_none());
    }
}
