//! jsonkp Decode - Typed extraction from JSON documents by keypath
//!
//! This crate turns values found at a dotted keypath into typed results:
//!
//! - A coercion engine with three target families (raw primitives,
//!   string-convertible types, composite types built from mappings)
//! - Collection decoding with per-item invalid value policies
//! - The `Decoder` entry point and the `JsonPath` extension trait
//!
//! ```
//! use jsonkp_decode::{decode_collection, InvalidItemPolicy};
//! use std::collections::BTreeMap;
//!
//! let doc = serde_json::json!({"key": {"key1": "value1", "key2": 2}});
//! let values: BTreeMap<String, String> =
//!     decode_collection(&doc, "key", InvalidItemPolicy::Value("default".into())).unwrap();
//! assert_eq!(values["key2"], "default");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod coerce;
pub mod collection;
pub mod decoder;
pub mod ext;
pub mod policy;
mod raw;
mod string;

// Re-export commonly used types
pub use jsonkp_core::{
    CoercionFailure, CoercionReason, DecodeError, KeyPath, KeyPathError, KeyPathLimits, Mapping,
    NodeKind, ResolutionFailure, ResolutionReason, Result,
};

// Re-export our own types
pub use coerce::{coerce, coerce_with_limits, Coercion, Decode, FromJsonString, FromMapping};
pub use collection::{decode_entries, decode_sequence, DecodeCollection};
pub use decoder::{
    decode, decode_at, decode_collection, decode_collection_at, decode_collection_optional,
    decode_optional, Decoder,
};
pub use ext::JsonPath;
pub use policy::{CalculateFn, InvalidItemPolicy};
