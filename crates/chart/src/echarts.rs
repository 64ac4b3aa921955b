//! ECharts option renderer. Emits the option object an ECharts runtime
//! needs to draw the chart; the runtime itself is not part of this crate.

use serde_json::{json, Value};
use tracing::debug;

use crate::error::ChartResult;
use crate::model::{ChartSpec, Theme};
use crate::ChartRenderer;

/// Serializes a chart as an ECharts `setOption` payload
#[derive(Debug, Clone, Copy)]
pub struct EChartsOptionRenderer {
    pretty: bool,
}

impl EChartsOptionRenderer {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Option object for `spec`
    pub fn option(&self, spec: &ChartSpec) -> ChartResult<Value> {
        spec.validate()?;

        let legend: Vec<&str> = spec.series.iter().map(|s| s.name.as_str()).collect();
        let series: Vec<Value> = spec
            .series
            .iter()
            .map(|s| {
                json!({
                    "name": s.name,
                    "type": "line",
                    "showSymbol": false,
                    "data": s.y,
                })
            })
            .collect();

        Ok(json!({
            "darkMode": spec.theme == Theme::Dark,
            "title": { "text": spec.title },
            "tooltip": { "trigger": "axis" },
            "legend": { "data": legend },
            "xAxis": { "type": "category", "data": spec.x_labels() },
            "yAxis": { "type": "value", "scale": true },
            "series": series,
        }))
    }
}

impl Default for EChartsOptionRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for EChartsOptionRenderer {
    fn name(&self) -> &'static str {
        "echarts"
    }

    fn render(&self, spec: &ChartSpec) -> ChartResult<String> {
        let option = self.option(spec)?;
        debug!("serialized echarts option for '{}'", spec.title);

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&option)?
        } else {
            serde_json::to_string(&option)?
        };
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use crate::model::ChartSeries;

    fn spec() -> ChartSpec {
        ChartSpec::new("TWAP")
            .with_series(ChartSeries::new(
                "30 min",
                vec!["1".into(), "2".into()],
                vec![1.25, 1.5],
            ))
            .with_series(ChartSeries::new("60 min", vec!["1".into()], vec![1.375]))
    }

    #[test]
    fn test_option_shape() {
        let option = EChartsOptionRenderer::new().option(&spec()).unwrap();

        assert_eq!(option["title"]["text"], "TWAP");
        assert_eq!(option["legend"]["data"], json!(["30 min", "60 min"]));
        assert_eq!(option["xAxis"]["data"], json!(["1", "2"]));
        assert_eq!(option["series"][0]["type"], "line");
        assert_eq!(option["series"][0]["data"], json!([1.25, 1.5]));
        assert_eq!(option["series"][1]["name"], "60 min");
        assert_eq!(option["darkMode"], true);
    }

    #[test]
    fn test_render_is_valid_json() {
        let rendered = EChartsOptionRenderer::compact().render(&spec()).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["series"].as_array().unwrap().len(), 2);
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn test_empty_chart_rejected() {
        assert_eq!(
            EChartsOptionRenderer::new().render(&ChartSpec::new("empty")),
            Err(ChartError::EmptyChart)
        );
    }
}
