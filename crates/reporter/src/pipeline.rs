//! # TWAP Pipeline
//!
//! Fetch once, evaluate many windows:
//!
//! 1. fetch every tick event of the pool from the source
//! 2. build the tick timeline and integrate it
//! 3. evaluate each window on a blocking task over the shared series
//! 4. collect the results in configured window order
//!
//! Any failure aborts the run with the failing stage's error.

use std::sync::Arc;

use tickwap_core::{
    build_timeline, integrate, CumulativeSeries, PriceConvention, TimelineStats, TwapEvaluator,
    TwapSeries, TwapWindow,
};
use tickwap_source::TickEventSource;
use tracing::{debug, info, warn};

use crate::error::ReporterResult;

/// Everything one run produced for a pool
#[derive(Debug, Clone, PartialEq)]
pub struct PoolReport {
    pub pool: String,
    /// Raw events returned by the source
    pub events: usize,
    pub stats: TimelineStats,
    /// Samples in the tick timeline
    pub samples: usize,
    /// Seconds between the first and last sample
    pub span_secs: i64,
    /// One entry per configured window, in configured order
    pub series: Vec<TwapSeries>,
}

impl PoolReport {
    pub fn total_points(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

pub struct TwapPipeline<S> {
    source: S,
    evaluator: TwapEvaluator,
    windows: Vec<TwapWindow>,
}

impl<S: TickEventSource> TwapPipeline<S> {
    pub fn new(source: S, convention: PriceConvention, windows: Vec<TwapWindow>) -> Self {
        Self {
            source,
            evaluator: TwapEvaluator::new(convention),
            windows,
        }
    }

    pub fn windows(&self) -> &[TwapWindow] {
        &self.windows
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Compute every configured window for `pool`
    pub async fn run(&self, pool: &str) -> ReporterResult<PoolReport> {
        let events = self.source.fetch_tick_events(pool).await?;
        info!("Fetched {} tick events for {}", events.len(), pool);

        let timeline = build_timeline(&events)?;
        debug!(
            "Timeline for {}: {} samples ({} accepted, {} replaced, {} dropped)",
            pool,
            timeline.samples.len(),
            timeline.stats.accepted,
            timeline.stats.replaced,
            timeline.stats.dropped
        );

        let series = Arc::new(integrate(&timeline.samples)?);
        let results = evaluate_windows(self.evaluator, Arc::clone(&series), &self.windows).await?;

        for result in &results {
            if result.points.is_empty() {
                warn!(
                    "Window '{}' ({}s) is longer than the observed span of {}s; no points",
                    result.window.label,
                    result.window.duration_secs,
                    series.span()
                );
            }
        }

        Ok(PoolReport {
            pool: pool.to_string(),
            events: events.len(),
            stats: timeline.stats,
            samples: series.len(),
            span_secs: series.span(),
            series: results,
        })
    }
}

/// Evaluate `windows` concurrently over one shared series
pub async fn evaluate_windows(
    evaluator: TwapEvaluator,
    series: Arc<CumulativeSeries>,
    windows: &[TwapWindow],
) -> ReporterResult<Vec<TwapSeries>> {
    let handles: Vec<_> = windows
        .iter()
        .cloned()
        .map(|window| {
            let series = Arc::clone(&series);
            tokio::task::spawn_blocking(move || evaluator.evaluate_window(&series, &window))
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let evaluated = handle.await??;
        debug!(
            "Window '{}': {} points",
            evaluated.window.label,
            evaluated.points.len()
        );
        results.push(evaluated);
    }

    Ok(results)
}
