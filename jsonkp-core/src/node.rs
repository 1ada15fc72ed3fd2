//! Document node kinds and the mapping view

use crate::limits::KeyPathLimits;
use serde_json::{Map, Value};
use std::fmt;
use std::ops::Deref;

/// Tag of a document node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `null`
    Null,
    /// `true` / `false`
    Bool,
    /// Any JSON number
    Number,
    /// A string
    String,
    /// An ordered array of nodes
    Sequence,
    /// An object keyed by strings
    Mapping,
}

impl NodeKind {
    /// Kind of the given value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Bool,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Sequence,
            Value::Object(_) => NodeKind::Mapping,
        }
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Null => "null",
            NodeKind::Bool => "boolean",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Sequence => "array",
            NodeKind::Mapping => "object",
        }
    }

    /// True for sequences and mappings
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Sequence | NodeKind::Mapping)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed view of a node known to be a mapping
///
/// Composite decoders receive a `Mapping` rather than a bare [`Value`], so the
/// object shape has already been checked by the time their code runs. The
/// view also carries the keypath limits of the decode that produced it, so
/// field lookups inside a composite obey the caller's configuration.
#[derive(Debug, Clone, Copy)]
pub struct Mapping<'a> {
    value: &'a Value,
    map: &'a Map<String, Value>,
    limits: KeyPathLimits,
}

impl<'a> Mapping<'a> {
    /// View `value` as a mapping under default limits, or `None` if it is any
    /// other kind
    pub fn new(value: &'a Value) -> Option<Self> {
        Self::with_limits(value, KeyPathLimits::default())
    }

    /// View `value` as a mapping whose nested lookups use `limits`
    pub fn with_limits(value: &'a Value, limits: KeyPathLimits) -> Option<Self> {
        value.as_object().map(|map| Self { value, map, limits })
    }

    /// Keypath limits for lookups inside this mapping
    pub fn limits(&self) -> &KeyPathLimits {
        &self.limits
    }

    /// The underlying node
    pub fn as_value(&self) -> &'a Value {
        self.value
    }

    /// The underlying object map
    pub fn as_map(&self) -> &'a Map<String, Value> {
        self.map
    }
}

impl Deref for Mapping<'_> {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        self.map
    }
}

impl PartialEq for Mapping<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}
