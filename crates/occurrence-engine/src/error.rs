//! Error types for occurrence-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdjustError {
    /// A single criterion cannot apply to the given point (e.g. day 31 of April).
    ///
    /// Searches absorb this error and step forward; it only reaches the caller
    /// when a single adjustment is applied directly.
    #[error("Invalid adjustment: {0}")]
    InvalidAdjustment(String),

    #[error("Search exhausted: no occurrence found after {attempts} attempts")]
    SearchExhausted { attempts: u32 },

    #[error("No applicable adjustment: every candidate was invalid")]
    NoApplicableAdjustment,

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("Unsupported period: {0}")]
    UnsupportedPeriod(String),
}

impl AdjustError {
    /// Whether this error only rules out the current candidate, leaving the
    /// surrounding search free to try the next one.
    pub fn is_invalid_adjustment(&self) -> bool {
        matches!(self, AdjustError::InvalidAdjustment(_))
    }
}

pub type Result<T> = std::result::Result<T, AdjustError>;
