//! Chart and series output

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;
use tickwap_core::BigDecimal;
use tickwap_chart::{ChartRenderer, ChartSpec, EChartsOptionRenderer, SvgLineRenderer};
use tracing::info;

use crate::config::{ChartConfig, ChartFormat};
use crate::error::{ReporterError, ReporterResult};
use crate::pipeline::PoolReport;

/// Renderer for the configured format
pub fn renderer_for(format: ChartFormat) -> Box<dyn ChartRenderer> {
    match format {
        ChartFormat::Svg => Box::new(SvgLineRenderer::new()),
        ChartFormat::Echarts => Box::new(EChartsOptionRenderer::new()),
    }
}

/// Chart description for a report
pub fn chart_spec(report: &PoolReport, title: &str, chart: &ChartConfig) -> ChartSpec {
    ChartSpec::from_twap_series(title, &report.series, chart.x_axis, chart.y_value)
        .with_theme(chart.theme)
        .with_size(chart.width, chart.height)
}

/// Render the report's chart in the configured format
pub fn render_chart(report: &PoolReport, title: &str, chart: &ChartConfig) -> ReporterResult<String> {
    let spec = chart_spec(report, title, chart);
    let renderer = renderer_for(chart.format);
    let rendered = renderer.render(&spec)?;
    info!(
        "Rendered {} chart with {} series",
        renderer.name(),
        spec.series.len()
    );
    Ok(rendered)
}

#[derive(Debug, Serialize)]
pub struct SeriesDocument<'a> {
    pub pool: &'a str,
    pub generated_at: String,
    pub events: usize,
    pub samples: usize,
    pub windows: Vec<WindowDocument<'a>>,
}

#[derive(Debug, Serialize)]
pub struct WindowDocument<'a> {
    pub label: &'a str,
    pub duration_secs: i64,
    pub points: Vec<PointDocument>,
}

#[derive(Debug, Serialize)]
pub struct PointDocument {
    pub timestamp: i64,
    pub block: u64,
    /// Exact decimal, kept as a string so no precision is lost
    pub twap: String,
    pub price: f64,
}

/// Plain decimal text without trailing fractional zeros
fn decimal_string(value: &BigDecimal) -> String {
    let text = value.to_string();
    if !text.contains('.') || text.contains(['e', 'E']) {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl<'a> SeriesDocument<'a> {
    pub fn from_report(report: &'a PoolReport) -> Self {
        let windows = report
            .series
            .iter()
            .map(|series| WindowDocument {
                label: &series.window.label,
                duration_secs: series.window.duration_secs,
                points: series
                    .points
                    .iter()
                    .map(|point| PointDocument {
                        timestamp: point.timestamp,
                        block: point.block,
                        twap: decimal_string(&point.twap),
                        price: point.price,
                    })
                    .collect(),
            })
            .collect();

        Self {
            pool: &report.pool,
            generated_at: Utc::now().to_rfc3339(),
            events: report.events,
            samples: report.samples,
            windows,
        }
    }
}

/// Write `content` to `path`, creating missing parent directories
pub fn write_artifact(path: &Path, content: &str) -> ReporterResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ReporterError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| ReporterError::io(path, e))?;
    info!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

/// Write the evaluated series as pretty JSON
pub fn write_series_json(path: &Path, report: &PoolReport) -> ReporterResult<()> {
    let document = SeriesDocument::from_report(report);
    let json = serde_json::to_string_pretty(&document)?;
    write_artifact(path, &json)
}
