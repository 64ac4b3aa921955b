//! # SVG Line Renderer
//!
//! Renders a [`ChartSpec`] to a standalone SVG document: title, legend,
//! y-axis with min/max labels, x-axis with first/last labels and one
//! polyline per series.
//!
//! Each render draws on its own [`SvgCanvas`], created for that render and
//! consumed when the document is finished. Nothing outlives the call.

use std::fmt::Write;

use tracing::debug;

use crate::error::ChartResult;
use crate::model::{ChartSpec, Theme};
use crate::ChartRenderer;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Line colours, cycled per series
const PALETTE: [&str; 6] = ["#4992ff", "#7cffb2", "#fddd60", "#ff6e76", "#58d9f9", "#05c091"];

struct Palette {
    background: &'static str,
    text: &'static str,
    axis: &'static str,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            background: "#100c2a",
            text: "#eeeeee",
            axis: "#6e7079",
        },
        Theme::Light => Palette {
            background: "#ffffff",
            text: "#333333",
            axis: "#6e7079",
        },
    }
}

/// Escape text for element content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Compact axis label for a value
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e9).contains(&magnitude) {
        return format!("{:.4e}", value);
    }
    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Drawing surface for a single render
pub struct SvgCanvas {
    width: f64,
    height: f64,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
            body: String::new(),
        }
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) -> ChartResult<()> {
        writeln!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
            x, y, width, height, fill
        )?;
        Ok(())
    }

    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str) -> ChartResult<()> {
        writeln!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
            from.0, from.1, to.0, to.1, stroke
        )?;
        Ok(())
    }

    pub fn text(&mut self, x: f64, y: f64, size: u32, anchor: &str, fill: &str, content: &str) -> ChartResult<()> {
        writeln!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="{}" text-anchor="{}" fill="{}">{}</text>"#,
            x,
            y,
            size,
            anchor,
            fill,
            escape_xml(content)
        )?;
        Ok(())
    }

    pub fn polyline(&mut self, name: &str, points: &[(f64, f64)], stroke: &str) -> ChartResult<()> {
        let mut coords = String::new();
        for (i, (x, y)) in points.iter().enumerate() {
            if i > 0 {
                coords.push(' ');
            }
            write!(coords, "{:.2},{:.2}", x, y)?;
        }
        writeln!(
            self.body,
            r#"<polyline data-series="{}" points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            escape_xml(name),
            coords,
            stroke
        )?;
        Ok(())
    }

    /// Wrap the drawn elements into a document
    pub fn finish(self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Self-contained SVG line chart
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgLineRenderer;

impl SvgLineRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ChartRenderer for SvgLineRenderer {
    fn name(&self) -> &'static str {
        "svg"
    }

    fn render(&self, spec: &ChartSpec) -> ChartResult<String> {
        spec.validate()?;

        let colors = palette(spec.theme);
        let width = spec.width as f64;
        let height = spec.height as f64;
        let plot_left = MARGIN_LEFT;
        let plot_right = (width - MARGIN_RIGHT).max(plot_left + 1.0);
        let plot_top = MARGIN_TOP;
        let plot_bottom = (height - MARGIN_BOTTOM).max(plot_top + 1.0);

        let labels = spec.x_labels();
        let (mut y_min, mut y_max) = spec.y_range().unwrap_or((0.0, 1.0));
        if y_max - y_min <= f64::EPSILON * y_max.abs().max(1.0) {
            let pad = (y_max.abs() * 0.01).max(1e-9);
            y_min -= pad;
            y_max += pad;
        }

        let x_at = |index: usize| -> f64 {
            if labels.len() <= 1 {
                (plot_left + plot_right) / 2.0
            } else {
                plot_left + (plot_right - plot_left) * index as f64 / (labels.len() - 1) as f64
            }
        };
        let y_at = |value: f64| -> f64 { plot_bottom - (plot_bottom - plot_top) * (value - y_min) / (y_max - y_min) };

        let mut canvas = SvgCanvas::new(spec.width, spec.height);
        canvas.rect(0.0, 0.0, width, height, colors.background)?;
        canvas.text(width / 2.0, 24.0, 16, "middle", colors.text, &spec.title)?;

        // legend
        let slot = (plot_right - plot_left) / spec.series.len().max(1) as f64;
        for (i, series) in spec.series.iter().enumerate() {
            let x = plot_left + slot * i as f64;
            let color = PALETTE[i % PALETTE.len()];
            canvas.line((x, 44.0), (x + 16.0, 44.0), color)?;
            canvas.text(x + 20.0, 48.0, 11, "start", colors.text, &series.name)?;
        }

        // axes
        canvas.line((plot_left, plot_top), (plot_left, plot_bottom), colors.axis)?;
        canvas.line((plot_left, plot_bottom), (plot_right, plot_bottom), colors.axis)?;
        canvas.text(plot_left - 6.0, plot_top + 4.0, 10, "end", colors.text, &format_value(y_max))?;
        canvas.text(plot_left - 6.0, plot_bottom, 10, "end", colors.text, &format_value(y_min))?;
        if let Some(first) = labels.first() {
            canvas.text(plot_left, plot_bottom + 16.0, 10, "start", colors.text, first)?;
        }
        if labels.len() > 1 {
            if let Some(last) = labels.last() {
                canvas.text(plot_right, plot_bottom + 16.0, 10, "end", colors.text, last)?;
            }
        }

        for (i, series) in spec.series.iter().enumerate() {
            let points: Vec<(f64, f64)> = series
                .y
                .iter()
                .enumerate()
                .map(|(index, &value)| (x_at(index), y_at(value)))
                .collect();
            canvas.polyline(&series.name, &points, PALETTE[i % PALETTE.len()])?;
        }

        debug!(
            "rendered svg chart '{}' with {} series over {} labels",
            spec.title,
            spec.series.len(),
            labels.len()
        );
        Ok(canvas.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use crate::model::ChartSeries;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| (100 + i).to_string()).collect()
    }

    fn spec() -> ChartSpec {
        ChartSpec::new("USDC/WETH <TWAP>")
            .with_series(ChartSeries::new("30 min", labels(3), vec![1.0, 2.0, 3.0]))
            .with_series(ChartSeries::new("60 min", labels(2), vec![1.5, 2.5]))
    }

    #[test]
    fn test_document_structure() {
        let svg = SvgLineRenderer::new().render(&spec()).unwrap();

        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"500\" height=\"500\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert!(svg.contains(r#"data-series="30 min""#));
        assert!(svg.contains(">30 min</text>"));
        assert!(svg.contains("fill=\"#100c2a\""));
    }

    #[test]
    fn test_title_is_escaped() {
        let svg = SvgLineRenderer::new().render(&spec()).unwrap();
        assert!(svg.contains("USDC/WETH &lt;TWAP&gt;"));
        assert!(!svg.contains("<TWAP>"));
    }

    #[test]
    fn test_axis_labels() {
        let svg = SvgLineRenderer::new().render(&spec()).unwrap();

        // min/max values and first/last x labels
        assert!(svg.contains(">3</text>"));
        assert!(svg.contains(">1</text>"));
        assert!(svg.contains(">100</text>"));
        assert!(svg.contains(">102</text>"));
    }

    #[test]
    fn test_polyline_spans_plot_area() {
        let svg = SvgLineRenderer::new().render(&spec()).unwrap();

        // max value at the top-left margin, min at the bottom
        assert!(svg.contains(r#"points="70.00,460.00 275.00,260.00 480.00,60.00""#));
    }

    #[test]
    fn test_flat_series_renders() {
        let flat = ChartSpec::new("flat")
            .with_theme(Theme::Light)
            .with_series(ChartSeries::new("a", labels(1), vec![2.0]));
        let svg = SvgLineRenderer::new().render(&flat).unwrap();

        assert!(svg.contains("fill=\"#ffffff\""));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn test_empty_chart_rejected() {
        let empty = ChartSpec::new("empty").with_series(ChartSeries::new("a", vec![], vec![]));
        assert_eq!(SvgLineRenderer::new().render(&empty), Err(ChartError::EmptyChart));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(0.000_25), "0.00025");
        assert_eq!(format_value(1234.5), "1234.5");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(1.5e-7), "1.5000e-7");
    }

    #[test]
    fn test_canvases_are_independent() {
        let renderer = SvgLineRenderer::new();
        let first = renderer.render(&spec()).unwrap();
        let second = renderer.render(&spec()).unwrap();
        assert_eq!(first, second);
    }
}
