//! # TWAP Evaluator
//!
//! Walks a cumulative series and emits one time-weighted average per sample
//! that has a complete forward window:
//!
//! ```text
//! end  = timestamp[i] + duration
//! twap = (cumulative(end) - cumulative[i]) / duration
//! ```
//!
//! `cumulative(end)` is an exact lookup when `end` lands on a sample and a
//! linear interpolation otherwise. Evaluation stops at the first window that
//! would end past the last sample, so a window longer than the observed span
//! yields no points.
//!
//! Evaluation only reads the series; several windows can be evaluated over
//! the same series concurrently.

use bigdecimal::BigDecimal;

use crate::boundary::BoundaryResolver;
use crate::cumulative::CumulativeSeries;
use crate::errors::{CoreResult, TwapError};
use crate::price::PriceConvention;
use crate::types::{TwapPoint, TwapWindow};

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// Evaluated points for one window
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct TwapSeries {
    pub window: TwapWindow,
    pub points: Vec<TwapPoint>,
}

/// Sliding-window TWAP evaluator
#[derive(Debug, Clone, Copy)]
pub struct TwapEvaluator {
    convention: PriceConvention,
}

impl TwapEvaluator {
    /// Create an evaluator quoting prices with `convention`
    pub fn new(convention: PriceConvention) -> Self {
        Self { convention }
    }

    pub fn convention(&self) -> PriceConvention {
        self.convention
    }

    /// TWAP points for every window start with a complete window
    pub fn evaluate(&self, series: &CumulativeSeries, duration_secs: i64) -> CoreResult<Vec<TwapPoint>> {
        if duration_secs <= 0 {
            return Err(TwapError::InvalidWindow(duration_secs));
        }

        let resolver = BoundaryResolver::new(series);
        let last_timestamp = series.last_timestamp();
        let duration = BigDecimal::from(duration_secs);

        let mut points = Vec::new();
        for start in series.points() {
            let end = start
                .timestamp
                .checked_add(duration_secs)
                .ok_or(TwapError::MathOverflow)?;
            if end > last_timestamp {
                break;
            }

            let end_cumulative = resolver.resolve(end).map_err(|err| match err {
                TwapError::OutOfRangeQuery { .. } => TwapError::InvariantViolation(format!(
                    "window [{}, {}] passed the fit check but {}",
                    start.timestamp, end, err
                )),
                other => other,
            })?;

            let twap = (end_cumulative - &start.cumulative_tick) / &duration;
            let price = self.convention.convert(&twap)?;

            points.push(TwapPoint {
                timestamp: start.timestamp,
                block: start.block,
                twap,
                price,
            });
        }

        Ok(points)
    }

    /// Evaluate a named window
    pub fn evaluate_window(&self, series: &CumulativeSeries, window: &TwapWindow) -> CoreResult<TwapSeries> {
        let points = self.evaluate(series, window.duration_secs)?;
        Ok(TwapSeries {
            window: window.clone(),
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cumulative::integrate;
    use crate::types::TickSample;

    fn series(samples: &[(i64, i64)]) -> CumulativeSeries {
        let samples: Vec<TickSample> = samples
            .iter()
            .map(|&(timestamp, tick)| TickSample {
                timestamp,
                tick: BigDecimal::from(tick),
                block: 100 + timestamp as u64,
            })
            .collect();
        integrate(&samples).unwrap()
    }

    fn raw() -> TwapEvaluator {
        TwapEvaluator::new(PriceConvention::raw())
    }

    #[test]
    fn test_window_ending_on_sample() {
        let s = series(&[(0, 0), (10, 100)]);
        let points = raw().evaluate(&s, 10).unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].timestamp, 0);
        assert_eq!(points[0].block, 100);
        assert_eq!(points[0].twap, BigDecimal::from(0));
        assert_eq!(points[0].price, 1.0);
    }

    #[test]
    fn test_window_ending_between_samples() {
        // tick 100 for 20s, then 200 for 20s
        let s = series(&[(0, 100), (20, 200), (40, 0)]);
        let points = raw().evaluate(&s, 30).unwrap();

        // [0, 30]: 100 * 20 + 200 * 10 = 4000 over 30s
        // [20, 50] does not fit
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].twap, BigDecimal::from(4000) / BigDecimal::from(30));
    }

    #[test]
    fn test_one_point_per_fitting_start() {
        let s = series(&[(0, 10), (5, 20), (10, 30), (15, 40), (20, 50)]);
        let points = raw().evaluate(&s, 10).unwrap();

        let starts: Vec<i64> = points.iter().map(|p| p.timestamp).collect();
        assert_eq!(starts, vec![0, 5, 10]);

        // [5, 15]: 20 * 5 + 30 * 5 = 250 over 10s
        assert_eq!(points[1].twap, BigDecimal::from(25));
    }

    #[test]
    fn test_window_longer_than_span_is_empty() {
        let s = series(&[(0, 10), (100, 20)]);
        assert!(raw().evaluate(&s, 101).unwrap().is_empty());
    }

    #[test]
    fn test_single_sample_yields_nothing() {
        let s = series(&[(0, 10)]);
        assert!(raw().evaluate(&s, 1).unwrap().is_empty());
    }

    #[test]
    fn test_non_positive_window_rejected() {
        let s = series(&[(0, 10), (100, 20)]);
        assert_eq!(raw().evaluate(&s, 0), Err(TwapError::InvalidWindow(0)));
        assert_eq!(raw().evaluate(&s, -5), Err(TwapError::InvalidWindow(-5)));
    }

    #[test]
    fn test_prices_follow_convention() {
        let s = series(&[(0, 100), (10, 100), (20, 0)]);
        let evaluator = TwapEvaluator::new(PriceConvention::inverted());
        let series = evaluator
            .evaluate_window(&s, &TwapWindow::new("10 s", 10))
            .unwrap();

        assert_eq!(series.window.label, "10 s");
        assert_eq!(series.points.len(), 2);
        let expected = 1.0 / 1.0001f64.powf(100.0);
        assert!((series.points[0].price - expected).abs() < 1e-12);
    }
}
