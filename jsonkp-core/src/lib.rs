//! jsonkp Core - Keypath primitives for typed JSON decoding
//!
//! This crate holds the pieces of jsonkp that do not depend on target types:
//!
//! - Dotted keypaths and their parsing limits
//! - Node kinds and the borrowed mapping view
//! - Keypath resolution over `serde_json::Value` trees
//! - The shared error taxonomy

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod keypath;
pub mod limits;
pub mod node;
pub mod resolve;

// Re-export commonly used types
pub use error::{
    CoercionFailure, CoercionReason, DecodeError, KeyPathError, ResolutionFailure,
    ResolutionReason, Result,
};
pub use keypath::KeyPath;
pub use limits::KeyPathLimits;
pub use node::{Mapping, NodeKind};
pub use resolve::{resolve, resolve_in};
