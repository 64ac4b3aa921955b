//! # Chart Model
//!
//! Renderer-independent description of a line chart: named series of
//! `(label, value)` pairs plus presentation settings.
//!
//! Series built from TWAP windows over one cumulative series share their
//! start samples, so a longer window's points are a prefix of a shorter
//! window's. The chart therefore uses the longest series' labels as the
//! shared x-axis.

use chrono::DateTime;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use tickwap_core::{TwapPoint, TwapSeries};

use crate::error::{ChartError, ChartResult};

pub const DEFAULT_WIDTH: u32 = 500;
pub const DEFAULT_HEIGHT: u32 = 500;

/// Colour scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// What the x-axis labels show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XAxisLabel {
    /// Block number of the window start
    #[default]
    Block,
    /// UTC time of the window start
    Timestamp,
}

/// What the y-axis plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YValue {
    /// Converted price
    #[default]
    Price,
    /// Average tick
    Twap,
}

impl XAxisLabel {
    fn label(&self, point: &TwapPoint) -> String {
        match self {
            XAxisLabel::Block => point.block.to_string(),
            XAxisLabel::Timestamp => DateTime::from_timestamp(point.timestamp, 0)
                .map(|time| time.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| point.timestamp.to_string()),
        }
    }
}

impl YValue {
    fn value(&self, point: &TwapPoint) -> f64 {
        match self {
            YValue::Price => point.price,
            YValue::Twap => point.twap.to_f64().unwrap_or(f64::NAN),
        }
    }
}

/// One named line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

impl ChartSeries {
    pub fn new(name: impl Into<String>, x: Vec<String>, y: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Project evaluated TWAP points onto chart axes
    pub fn from_twap(series: &TwapSeries, x_axis: XAxisLabel, y_value: YValue) -> Self {
        let (x, y) = series
            .points
            .iter()
            .map(|point| (x_axis.label(point), y_value.value(point)))
            .unzip();
        Self::new(series.window.label.clone(), x, y)
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// Everything a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub theme: Theme,
    pub width: u32,
    pub height: u32,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            theme: Theme::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            series: Vec::new(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    /// One line per evaluated window, in the given order
    pub fn from_twap_series(
        title: impl Into<String>,
        windows: &[TwapSeries],
        x_axis: XAxisLabel,
        y_value: YValue,
    ) -> Self {
        windows.iter().fold(Self::new(title), |spec, series| {
            spec.with_series(ChartSeries::from_twap(series, x_axis, y_value))
        })
    }

    /// Labels of the longest series
    pub fn x_labels(&self) -> &[String] {
        self.series
            .iter()
            .max_by_key(|s| s.x.len())
            .map(|s| s.x.as_slice())
            .unwrap_or(&[])
    }

    /// Smallest and largest value over every series
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.y.iter().copied())
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
    }

    /// Check the chart is drawable
    pub fn validate(&self) -> ChartResult<()> {
        for series in &self.series {
            if series.x.len() != series.y.len() {
                return Err(ChartError::SeriesLengthMismatch {
                    series: series.name.clone(),
                    labels: series.x.len(),
                    values: series.y.len(),
                });
            }
            if let Some(index) = series.y.iter().position(|v| !v.is_finite()) {
                return Err(ChartError::NonFiniteValue {
                    series: series.name.clone(),
                    index,
                });
            }
        }

        if self.series.iter().all(ChartSeries::is_empty) {
            return Err(ChartError::EmptyChart);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tickwap_core::{BigDecimal, TwapWindow};

    fn twap_series(label: &str, points: &[(i64, u64, i64, f64)]) -> TwapSeries {
        TwapSeries {
            window: TwapWindow::new(label, 1800),
            points: points
                .iter()
                .map(|&(timestamp, block, twap, price)| TwapPoint {
                    timestamp,
                    block,
                    twap: BigDecimal::from(twap),
                    price,
                })
                .collect(),
        }
    }

    #[test]
    fn test_block_labels_and_prices() {
        let series = twap_series("30 min", &[(1_690_000_000, 17_000_000, -200, 0.98)]);
        let chart = ChartSeries::from_twap(&series, XAxisLabel::Block, YValue::Price);

        assert_eq!(chart.name, "30 min");
        assert_eq!(chart.x, vec!["17000000".to_string()]);
        assert_eq!(chart.y, vec![0.98]);
    }

    #[test]
    fn test_timestamp_labels_and_ticks() {
        let series = twap_series("60 min", &[(0, 1, -200, 0.98)]);
        let chart = ChartSeries::from_twap(&series, XAxisLabel::Timestamp, YValue::Twap);

        assert_eq!(chart.x, vec!["1970-01-01 00:00".to_string()]);
        assert_eq!(chart.y, vec![-200.0]);
    }

    #[test]
    fn test_longest_series_supplies_labels() {
        let spec = ChartSpec::from_twap_series(
            "TWAP",
            &[
                twap_series("30 min", &[(0, 1, 1, 1.0), (10, 2, 2, 2.0), (20, 3, 3, 3.0)]),
                twap_series("60 min", &[(0, 1, 1, 1.5)]),
            ],
            XAxisLabel::Block,
            YValue::Price,
        );

        assert_eq!(spec.series.len(), 2);
        assert_eq!(spec.x_labels(), &["1", "2", "3"]);
        assert_eq!(spec.y_range(), Some((1.0, 3.0)));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        assert_eq!(ChartSpec::new("empty").validate(), Err(ChartError::EmptyChart));

        let only_empty = ChartSpec::new("t").with_series(ChartSeries::new("a", vec![], vec![]));
        assert_eq!(only_empty.validate(), Err(ChartError::EmptyChart));

        let mismatched = ChartSpec::new("t").with_series(ChartSeries::new("a", vec!["1".into()], vec![]));
        assert!(matches!(
            mismatched.validate(),
            Err(ChartError::SeriesLengthMismatch { labels: 1, values: 0, .. })
        ));

        let nan = ChartSpec::new("t").with_series(ChartSeries::new("a", vec!["1".into()], vec![f64::NAN]));
        assert!(matches!(nan.validate(), Err(ChartError::NonFiniteValue { index: 0, .. })));
    }

    #[test]
    fn test_defaults() {
        let spec = ChartSpec::new("t");
        assert_eq!(spec.theme, Theme::Dark);
        assert_eq!((spec.width, spec.height), (500, 500));
    }
}
