//! Decode guards for untrusted chunks

use serde::{Deserialize, Serialize};

/// Upper bounds applied while undumping.
///
/// A chunk is untrusted input: every count and size it carries is checked
/// against these bounds before it drives recursion or allocation. A value
/// above a bound fails the decode with [`UndumpError::LimitExceeded`].
///
/// [`UndumpError::LimitExceeded`]: crate::UndumpError::LimitExceeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeLimits {
    /// Deepest allowed prototype nesting. The main function is depth 0.
    pub max_depth: u32,
    /// Largest element count accepted for any array field
    pub max_array_len: u32,
    /// Largest byte length accepted for a string
    pub max_string_len: u64,
}

impl DecodeLimits {
    /// Matches the C-call limit of the reference interpreter
    pub const DEFAULT_MAX_DEPTH: u32 = 200;
    /// Default array bound (16M elements)
    pub const DEFAULT_MAX_ARRAY_LEN: u32 = 1 << 24;
    /// Default string bound (1 GiB)
    pub const DEFAULT_MAX_STRING_LEN: u64 = 1 << 30;

    /// Limits that only stop at the wire format's own ceilings
    pub fn unbounded() -> Self {
        Self {
            max_depth: u32::MAX,
            max_array_len: u32::MAX,
            max_string_len: u64::MAX,
        }
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the maximum array length
    pub fn with_max_array_len(mut self, max_array_len: u32) -> Self {
        self.max_array_len = max_array_len;
        self
    }

    /// Set the maximum string length
    pub fn with_max_string_len(mut self, max_string_len: u64) -> Self {
        self.max_string_len = max_string_len;
        self
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_array_len: Self::DEFAULT_MAX_ARRAY_LEN,
            max_string_len: Self::DEFAULT_MAX_STRING_LEN,
        }
    }
}
