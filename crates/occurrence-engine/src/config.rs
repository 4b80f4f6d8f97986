//! Search configuration.

use serde::{Deserialize, Serialize};

/// Default ceiling on search attempts for [`AllOf`](crate::AllOf) and
/// [`ForwardOnly`](crate::ForwardOnly).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// Bounds applied to every iterative search.
///
/// The ceiling is the only guard against criteria that never agree or that
/// oscillate across periods, so it is carried by each search rather than kept
/// as global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Maximum number of attempts before giving up with
    /// [`AdjustError::SearchExhausted`](crate::AdjustError::SearchExhausted).
    /// Zero allows no attempt at all: every search fails immediately.
    pub max_attempts: u32,
}

impl SearchLimits {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
