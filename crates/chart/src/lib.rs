//! # Tickwap Chart - TWAP Line Charts
//!
//! Turns evaluated TWAP series into a line chart with one line per window.
//! The [`ChartSpec`] model is renderer-independent; two renderers ship:
//!
//! - [`SvgLineRenderer`]: a standalone SVG document
//! - [`EChartsOptionRenderer`]: the ECharts option JSON for an external
//!   ECharts runtime

pub mod echarts;
pub mod error;
pub mod model;
pub mod svg;

// Re-export commonly used items
pub use echarts::EChartsOptionRenderer;
pub use error::{ChartError, ChartResult};
pub use model::{ChartSeries, ChartSpec, Theme, XAxisLabel, YValue, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use svg::{SvgCanvas, SvgLineRenderer};

/// Produces a rendered artifact from a chart description
pub trait ChartRenderer: Send + Sync {
    /// Short format name for logs
    fn name(&self) -> &'static str;

    /// Render `spec` to its textual artifact
    fn render(&self, spec: &ChartSpec) -> ChartResult<String>;
}
