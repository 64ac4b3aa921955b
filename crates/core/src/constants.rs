//! # Engine Constants
//!
//! Fundamental constants for tick-based pricing and the default TWAP windows.

// ============================================================================
// Tick Grid
// ============================================================================

/// Price ratio between two adjacent ticks: price = 1.0001^tick
pub const TICK_BASE: f64 = 1.0001;

// ============================================================================
// TWAP Windows
// ============================================================================

/// Default TWAP windows in seconds
pub const TWAP_WINDOW_30_MIN: i64 = 30 * 60;
pub const TWAP_WINDOW_60_MIN: i64 = 60 * 60;
pub const TWAP_WINDOW_120_MIN: i64 = 120 * 60;

/// Windows evaluated when a caller does not configure its own
pub const DEFAULT_TWAP_WINDOWS: [i64; 3] = [
    TWAP_WINDOW_30_MIN,
    TWAP_WINDOW_60_MIN,
    TWAP_WINDOW_120_MIN,
];
