//! # Core Error Types
//!
//! Errors raised by the TWAP engine. Every stage returns these instead of
//! panicking so a failure aborts the remaining stages of one computation.

use thiserror::Error;

/// Errors that can occur while building, integrating or evaluating a series
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TwapError {
    // ========================================================================
    // Input Errors
    // ========================================================================

    #[error("No tick events for the requested pool")]
    EmptyInput,

    #[error("Sample timestamps not strictly increasing at index {index}")]
    NonMonotonicTimestamps { index: usize },

    #[error("Invalid window duration: {0}s (must be positive)")]
    InvalidWindow(i64),

    // ========================================================================
    // Lookup Errors
    // ========================================================================

    #[error("Query timestamp {timestamp} outside sample range [{first}, {last}]")]
    OutOfRangeQuery { timestamp: i64, first: i64, last: i64 },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),

    // ========================================================================
    // Numeric Errors
    // ========================================================================

    #[error("Price conversion failed: {0}")]
    PriceConversion(String),

    #[error("Math overflow")]
    MathOverflow,
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, TwapError>;

// Helper functions for creating specific errors
impl TwapError {
    /// Create an out-of-range query error
    pub fn out_of_range(timestamp: i64, first: i64, last: i64) -> Self {
        Self::OutOfRangeQuery { timestamp, first, last }
    }

    /// Create a price conversion error with reason
    pub fn price_conversion(reason: impl Into<String>) -> Self {
        Self::PriceConversion(reason.into())
    }
}
