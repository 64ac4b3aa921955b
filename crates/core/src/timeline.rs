//! # Tick Timeline
//!
//! Condenses raw tick events into the authoritative tick timeline: at most
//! one sample per timestamp, one sample per real tick transition.
//!
//! Rules, applied per event in source order:
//! - a sample already exists at the event's timestamp: the event replaces it
//!   when its log index is strictly greater (last-in-block wins)
//! - no sample at the timestamp and the tick differs from the last accepted
//!   tick: a new sample is created
//! - otherwise the event is redundant and dropped
//!
//! Ticks are compared by numeric value, so `-5` and `-5.00` are the same tick.

use std::collections::BTreeMap;

use bigdecimal::BigDecimal;

use crate::errors::{CoreResult, TwapError};
use crate::types::{TickEvent, TickSample};

/// Outcome of feeding one event to the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    Replaced,
    Dropped,
}

/// Per-build counters, useful to spot noisy inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineStats {
    pub accepted: usize,
    pub replaced: usize,
    pub dropped: usize,
}

impl TimelineStats {
    fn record(&mut self, admission: Admission) {
        match admission {
            Admission::Accepted => self.accepted += 1,
            Admission::Replaced => self.replaced += 1,
            Admission::Dropped => self.dropped += 1,
        }
    }
}

/// Ordered, deduplicated samples plus the counters of the build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickTimeline {
    pub samples: Vec<TickSample>,
    pub stats: TimelineStats,
}

#[derive(Debug, Clone)]
struct Slot {
    sample: TickSample,
    /// `None` for the seed sample, which any event at its timestamp replaces
    log_index: Option<u64>,
}

/// Incremental timeline builder
#[derive(Debug, Clone)]
pub struct TickTimelineBuilder {
    slots: BTreeMap<i64, Slot>,
    last_accepted_tick: BigDecimal,
    stats: TimelineStats,
}

impl TickTimelineBuilder {
    /// Start a timeline at `first.timestamp` holding `first.initial_tick`
    pub fn seeded(first: &TickEvent) -> Self {
        let seed = Slot {
            sample: TickSample {
                timestamp: first.timestamp,
                tick: first.initial_tick.clone(),
                block: first.block_number,
            },
            log_index: None,
        };

        let mut slots = BTreeMap::new();
        slots.insert(first.timestamp, seed);

        Self {
            slots,
            last_accepted_tick: first.initial_tick.clone(),
            stats: TimelineStats::default(),
        }
    }

    /// Feed one event
    pub fn push(&mut self, event: &TickEvent) -> Admission {
        let admission = match self.slots.get_mut(&event.timestamp) {
            Some(slot) => {
                if Some(event.log_index) > slot.log_index {
                    slot.sample.tick = event.tick.clone();
                    slot.sample.block = event.block_number;
                    slot.log_index = Some(event.log_index);
                    self.last_accepted_tick = event.tick.clone();
                    Admission::Replaced
                } else {
                    Admission::Dropped
                }
            }
            None if event.tick != self.last_accepted_tick => {
                self.slots.insert(
                    event.timestamp,
                    Slot {
                        sample: TickSample {
                            timestamp: event.timestamp,
                            tick: event.tick.clone(),
                            block: event.block_number,
                        },
                        log_index: Some(event.log_index),
                    },
                );
                self.last_accepted_tick = event.tick.clone();
                Admission::Accepted
            }
            None => Admission::Dropped,
        };

        self.stats.record(admission);
        admission
    }

    /// Tick of the most recently accepted or replacing event
    pub fn last_accepted_tick(&self) -> &BigDecimal {
        &self.last_accepted_tick
    }

    /// Samples ascending by timestamp
    pub fn finish(self) -> TickTimeline {
        TickTimeline {
            samples: self.slots.into_values().map(|slot| slot.sample).collect(),
            stats: self.stats,
        }
    }
}

/// Build the tick timeline for one pool's full event list
pub fn build_timeline(events: &[TickEvent]) -> CoreResult<TickTimeline> {
    let first = events.first().ok_or(TwapError::EmptyInput)?;

    let mut builder = TickTimelineBuilder::seeded(first);
    for event in events {
        builder.push(event);
    }

    Ok(builder.finish())
}
