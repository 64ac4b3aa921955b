//! # Boundary Resolution
//!
//! Cumulative tick at an arbitrary timestamp inside the observed span. An
//! exact sample hit returns the stored value untouched; anything between two
//! samples is linearly interpolated. Queries outside the span are errors,
//! never extrapolated.

use bigdecimal::BigDecimal;

use crate::cumulative::CumulativeSeries;
use crate::errors::{CoreResult, TwapError};

/// Position of a query timestamp relative to the samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// The query lands on sample `index`
    Exact(usize),
    /// The query lies strictly between samples `lower` and `upper`
    Between { lower: usize, upper: usize },
}

/// Resolves cumulative values over one series
#[derive(Debug, Clone, Copy)]
pub struct BoundaryResolver<'a> {
    series: &'a CumulativeSeries,
}

impl<'a> BoundaryResolver<'a> {
    pub fn new(series: &'a CumulativeSeries) -> Self {
        Self { series }
    }

    /// Locate the bracketing samples with a binary search
    pub fn bracket(&self, timestamp: i64) -> CoreResult<Bracket> {
        let timestamps = self.series.timestamps();
        let (first, last) = match (timestamps.first(), timestamps.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(TwapError::EmptyInput),
        };

        match timestamps.binary_search(&timestamp) {
            Ok(index) => Ok(Bracket::Exact(index)),
            Err(insert_at) if insert_at == 0 || insert_at == timestamps.len() => {
                Err(TwapError::out_of_range(timestamp, first, last))
            }
            Err(insert_at) => Ok(Bracket::Between {
                lower: insert_at - 1,
                upper: insert_at,
            }),
        }
    }

    /// Cumulative tick at `timestamp`
    pub fn resolve(&self, timestamp: i64) -> CoreResult<BigDecimal> {
        let points = self.series.points();

        match self.bracket(timestamp)? {
            Bracket::Exact(index) => Ok(points[index].cumulative_tick.clone()),
            Bracket::Between { lower, upper } => {
                let (lo, hi) = (&points[lower], &points[upper]);

                let span = BigDecimal::from(hi.timestamp - lo.timestamp);
                let elapsed = BigDecimal::from(timestamp - lo.timestamp);
                let rise = &hi.cumulative_tick - &lo.cumulative_tick;

                // multiply before dividing so exact fractions stay exact
                let offset = (rise * elapsed) / span;
                Ok(&lo.cumulative_tick + offset)
            }
        }
    }
}
