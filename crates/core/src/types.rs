//! # Engine Types
//!
//! Data carried between the stages of one TWAP computation: raw events from
//! the data source, the deduplicated tick timeline, the cumulative series and
//! the evaluated TWAP points.

use bigdecimal::BigDecimal;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// Raw tick-change event as produced by the data source
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct TickEvent {
    /// Index entity id, used as the pagination cursor
    pub id: String,
    /// Pool tick after this event
    pub tick: BigDecimal,
    /// Block timestamp in seconds
    pub timestamp: i64,
    pub block_number: u64,
    /// Position of the event log within its block
    pub log_index: u64,
    pub transaction_log_index: u64,
    /// Pool tick before the first event of the queried range
    pub initial_tick: BigDecimal,
}

/// Effective tick from `timestamp` until the next sample
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct TickSample {
    pub timestamp: i64,
    pub tick: BigDecimal,
    pub block: u64,
}

/// Integral of the tick timeline from the first sample up to `timestamp`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct CumulativePoint {
    pub timestamp: i64,
    pub cumulative_tick: BigDecimal,
    pub block: u64,
}

/// TWAP over `[timestamp, timestamp + duration]` for one window
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct TwapPoint {
    /// Window start
    pub timestamp: i64,
    /// Block of the sample the window starts at
    pub block: u64,
    /// Time-weighted average tick
    pub twap: BigDecimal,
    /// `twap` converted with the caller's price convention
    pub price: f64,
}

/// Named window duration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct TwapWindow {
    /// Series name, e.g. "30 min"
    pub label: String,
    pub duration_secs: i64,
}

impl TwapWindow {
    pub fn new(label: impl Into<String>, duration_secs: i64) -> Self {
        Self {
            label: label.into(),
            duration_secs,
        }
    }

    /// Window labelled "<n> min"
    pub fn minutes(minutes: i64) -> Self {
        Self::new(format!("{} min", minutes), minutes * 60)
    }
}
