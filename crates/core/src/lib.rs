//! # Tickwap Core - TWAP Engine
//!
//! This crate contains the pure computation engine that turns on-chain
//! tick-change events into time-weighted average prices. It provides:
//!
//! - Type definitions for tick events, samples and TWAP points
//! - The tick timeline builder (dedup and last-in-block selection)
//! - The cumulative tick integrator
//! - Boundary resolution with linear interpolation
//! - The sliding-window TWAP evaluator
//! - Tick to price conversion
//!
//! Everything here is synchronous and free of I/O. Fetching events and
//! rendering charts live in the sibling crates.
//!
//! ## Feature Flags
//!
//! - `client`: Enables serde serialization of the output types

pub mod boundary;
pub mod constants;
pub mod cumulative;
pub mod errors;
pub mod evaluator;
pub mod price;
pub mod timeline;
pub mod types;

// Re-export commonly used items
pub use bigdecimal::BigDecimal;
pub use boundary::{Bracket, BoundaryResolver};
pub use constants::*;
pub use cumulative::{integrate, CumulativeSeries};
pub use errors::{CoreResult, TwapError};
pub use evaluator::{TwapEvaluator, TwapSeries};
pub use price::PriceConvention;
pub use timeline::{build_timeline, Admission, TickTimeline, TickTimelineBuilder, TimelineStats};
pub use types::*;
