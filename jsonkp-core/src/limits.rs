//! Keypath limits and configuration

use crate::error::KeyPathError;

/// Limits applied when parsing keypaths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPathLimits {
    /// Maximum number of segments (default: 64, hard: 512)
    pub max_depth: usize,
    /// Maximum keypath string length in bytes (default: 1,024, hard: 16 KiB)
    pub max_path_length: usize,
}

impl Default for KeyPathLimits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_path_length: 1_024,
        }
    }
}

impl KeyPathLimits {
    /// Hard maximum limits that cannot be exceeded
    pub fn hard_maximums() -> Self {
        Self {
            max_depth: 512,
            max_path_length: 16 * 1024,
        }
    }

    /// Validate limits against hard maximums
    pub fn validate(&self) -> Result<(), KeyPathError> {
        let hard = Self::hard_maximums();

        if self.max_depth > hard.max_depth {
            return Err(KeyPathError::LimitsExceedHardMaximum {
                reason: format!(
                    "max_depth {} exceeds hard limit {}",
                    self.max_depth, hard.max_depth
                ),
                max_depth: hard.max_depth,
                max_path_length: hard.max_path_length,
            });
        }

        if self.max_path_length > hard.max_path_length {
            return Err(KeyPathError::LimitsExceedHardMaximum {
                reason: format!(
                    "max_path_length {} exceeds hard limit {}",
                    self.max_path_length, hard.max_path_length
                ),
                max_depth: hard.max_depth,
                max_path_length: hard.max_path_length,
            });
        }

        Ok(())
    }
}
