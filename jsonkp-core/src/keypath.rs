//! Dotted keypaths

use crate::error::KeyPathError;
use crate::limits::KeyPathLimits;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Segment separator for the textual keypath form
pub const SEPARATOR: char = '.';

/// An ordered sequence of keypath segments
///
/// Parsed from a dotted string such as `"data.users.0.name"`. There is no
/// escaping: a `.` always separates segments. The empty string is the root
/// path, which resolves to the document itself.
///
/// Segments appended with [`KeyPath::child`] are taken verbatim, so a mapping
/// key that itself contains a `.` is still a single segment even though its
/// display form is ambiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: SmallVec<[String; 4]>,
}

impl KeyPath {
    /// The empty path (identity resolution)
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted keypath using the default [`KeyPathLimits`]
    pub fn parse(path: &str) -> Result<Self, KeyPathError> {
        Self::parse_with_limits(path, &KeyPathLimits::default())
    }

    /// Parse a dotted keypath, enforcing the given limits
    pub fn parse_with_limits(path: &str, limits: &KeyPathLimits) -> Result<Self, KeyPathError> {
        if path.len() > limits.max_path_length {
            return Err(KeyPathError::TooLong {
                path: path.to_string(),
                length: path.len(),
                max_length: limits.max_path_length,
            });
        }

        if path.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = SmallVec::new();
        for (position, segment) in path.split(SEPARATOR).enumerate() {
            if segment.is_empty() {
                return Err(KeyPathError::EmptySegment {
                    path: path.to_string(),
                    position,
                });
            }
            segments.push(segment.to_string());
        }

        if segments.len() > limits.max_depth {
            return Err(KeyPathError::TooDeep {
                path: path.to_string(),
                depth: segments.len(),
                max_depth: limits.max_depth,
            });
        }

        Ok(Self { segments })
    }

    /// Build a path from already-split segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Segments in navigation order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the root path
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, if any
    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// A new path with `segment` appended
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// A new path addressing element `index` of the sequence at this path
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    /// This path followed by every segment of `other`
    pub fn join(&self, other: &KeyPath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// The first `len` segments (clamped to the path length)
    pub fn prefix(&self, len: usize) -> Self {
        let len = len.min(self.segments.len());
        Self {
            segments: self.segments[..len].iter().cloned().collect(),
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
