//! # Cumulative Tick
//!
//! Running time-integral of the tick timeline. The tick recorded at sample
//! `i - 1` holds until sample `i` (left-endpoint, step-held sum):
//!
//! ```text
//! cumulative[0] = 0
//! cumulative[i] = cumulative[i-1] + tick[i-1] * (timestamp[i] - timestamp[i-1])
//! ```
//!
//! The origin is arbitrary; only differences between two points are
//! meaningful.

use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::errors::{CoreResult, TwapError};
use crate::types::{CumulativePoint, TickSample};

/// Cumulative points aligned index-for-index with the sorted timestamps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CumulativeSeries {
    timestamps: Vec<i64>,
    points: Vec<CumulativePoint>,
}

impl CumulativeSeries {
    /// Integrate an ordered, non-empty sample sequence
    pub fn from_samples(samples: &[TickSample]) -> CoreResult<Self> {
        let first = samples.first().ok_or(TwapError::EmptyInput)?;

        let mut points = Vec::with_capacity(samples.len());
        points.push(CumulativePoint {
            timestamp: first.timestamp,
            cumulative_tick: BigDecimal::zero(),
            block: first.block,
        });

        for (index, pair) in samples.windows(2).enumerate() {
            let (prev, current) = (&pair[0], &pair[1]);
            if current.timestamp <= prev.timestamp {
                return Err(TwapError::NonMonotonicTimestamps { index: index + 1 });
            }

            let elapsed = current
                .timestamp
                .checked_sub(prev.timestamp)
                .ok_or(TwapError::MathOverflow)?;
            let area = &prev.tick * BigDecimal::from(elapsed);
            let cumulative_tick = &points[index].cumulative_tick + area;

            points.push(CumulativePoint {
                timestamp: current.timestamp,
                cumulative_tick,
                block: current.block,
            });
        }

        let timestamps = points.iter().map(|p| p.timestamp).collect();
        Ok(Self { timestamps, points })
    }

    /// Sorted sample timestamps
    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn points(&self) -> &[CumulativePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_timestamp(&self) -> i64 {
        self.timestamps[0]
    }

    pub fn last_timestamp(&self) -> i64 {
        self.timestamps[self.timestamps.len() - 1]
    }

    /// Observed time span in seconds
    pub fn span(&self) -> i64 {
        self.last_timestamp() - self.first_timestamp()
    }
}

/// Integrate a tick timeline into its cumulative series
pub fn integrate(samples: &[TickSample]) -> CoreResult<CumulativeSeries> {
    CumulativeSeries::from_samples(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp: i64, tick: i64) -> TickSample {
        TickSample {
            timestamp,
            tick: BigDecimal::from(tick),
            block: timestamp as u64,
        }
    }

    fn values(series: &CumulativeSeries) -> Vec<BigDecimal> {
        series.points().iter().map(|p| p.cumulative_tick.clone()).collect()
    }

    #[test]
    fn test_zero_tick_contributes_nothing() {
        let series = integrate(&[sample(0, 0), sample(10, 100)]).unwrap();
        assert_eq!(values(&series), vec![BigDecimal::from(0), BigDecimal::from(0)]);
    }

    #[test]
    fn test_left_endpoint_sum() {
        let series = integrate(&[sample(0, 100), sample(20, 200), sample(25, -50)]).unwrap();

        // 100 * 20 = 2000, then + 200 * 5 = 3000
        assert_eq!(
            values(&series),
            vec![BigDecimal::from(0), BigDecimal::from(2000), BigDecimal::from(3000)]
        );
        assert_eq!(series.timestamps(), &[0, 20, 25]);
        assert_eq!(series.span(), 25);
    }

    #[test]
    fn test_negative_ticks_decrease_cumulative() {
        let series = integrate(&[sample(0, -10), sample(5, 3), sample(6, 3)]).unwrap();
        assert_eq!(
            values(&series),
            vec![BigDecimal::from(0), BigDecimal::from(-50), BigDecimal::from(-47)]
        );
    }

    #[test]
    fn test_single_sample() {
        let series = integrate(&[sample(42, 7)]).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.first_timestamp(), 42);
        assert_eq!(series.last_timestamp(), 42);
        assert_eq!(series.span(), 0);
    }

    #[test]
    fn test_empty_samples_rejected() {
        assert_eq!(integrate(&[]), Err(TwapError::EmptyInput));
    }

    #[test]
    fn test_non_monotonic_timestamps_rejected() {
        let result = integrate(&[sample(0, 1), sample(10, 1), sample(10, 2)]);
        assert_eq!(result, Err(TwapError::NonMonotonicTimestamps { index: 2 }));
    }
}
