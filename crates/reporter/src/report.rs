//! One end-to-end report run: pick the source, compute, write the outputs.

use std::time::Duration;

use tickwap_source::{HttpTransport, StaticSource, SubgraphSource, TickEventSource};
use tracing::info;

use crate::config::ReporterConfig;
use crate::error::{ReporterError, ReporterResult};
use crate::output::{render_chart, write_artifact, write_series_json};
use crate::pipeline::{PoolReport, TwapPipeline};

fn pipeline<S: TickEventSource>(source: S, config: &ReporterConfig) -> TwapPipeline<S> {
    TwapPipeline::new(source, config.price, config.windows.clone())
}

/// Fetch, evaluate and write the chart (and series JSON, if configured)
pub async fn generate_report(config: &ReporterConfig) -> ReporterResult<PoolReport> {
    let pool = config.pool.id.as_str();

    let report = match &config.source.fixture {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| ReporterError::io(path, e))?;
            let source = StaticSource::from_json_str(&json)?;
            info!(
                "Loaded {} fixture events from {}",
                source.events().len(),
                path.display()
            );
            pipeline(source, config).run(pool).await?
        }
        None => {
            let transport = HttpTransport::new(
                config.source.endpoint.as_str(),
                Duration::from_secs(config.source.request_timeout_secs),
            )?;
            let source = SubgraphSource::new(transport)
                .with_page_size(config.source.page_size)
                .with_retry(config.source.retry.clone());
            info!("Fetching tick events from {}", config.source.endpoint);
            pipeline(source, config).run(pool).await?
        }
    };

    info!(
        "Pool {}: {} events, {} samples over {}s, {} TWAP points",
        report.pool,
        report.events,
        report.samples,
        report.span_secs,
        report.total_points()
    );

    if let Some(path) = &config.output.series_json {
        write_series_json(path, &report)?;
    }

    let chart = render_chart(&report, &config.chart_title(), &config.chart)?;
    write_artifact(&config.output.path, &chart)?;

    Ok(report)
}
