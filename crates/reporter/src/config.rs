use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tickwap_chart::{Theme, XAxisLabel, YValue, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use tickwap_core::{PriceConvention, TwapWindow, DEFAULT_TWAP_WINDOWS};
use tickwap_source::{RetryConfig, MAX_PAGE_SIZE};

use crate::error::{ReporterError, ReporterResult};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Reporter configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReporterConfig {
    /// Where tick events come from
    pub source: SourceConfig,

    /// Pool to report on
    pub pool: PoolConfig,

    /// Tick to price convention; always explicit
    pub price: PriceConvention,

    /// Windows to evaluate, one chart line each
    #[serde(default = "default_windows")]
    pub windows: Vec<TwapWindow>,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Subgraph connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SourceConfig {
    /// GraphQL endpoint of the index
    pub endpoint: String,

    /// Events requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,

    /// Read events from this JSON file instead of the endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PoolConfig {
    /// Pool identifier as the index knows it
    pub id: String,

    /// Display name used in the chart title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Chart format written to the output path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartFormat {
    #[default]
    Svg,
    Echarts,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart title; defaults to "<pool> TWAP"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub theme: Theme,
    pub width: u32,
    pub height: u32,
    pub x_axis: XAxisLabel,
    pub y_value: YValue,
    pub format: ChartFormat,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Rendered chart
    pub path: PathBuf,

    /// Evaluated series as JSON, if set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_json: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,

    /// JSON log lines instead of human-readable output
    pub structured: bool,
}

fn default_page_size() -> usize {
    MAX_PAGE_SIZE
}

fn default_request_timeout() -> u64 {
    30
}

fn default_windows() -> Vec<TwapWindow> {
    DEFAULT_TWAP_WINDOWS
        .iter()
        .map(|&secs| TwapWindow::minutes(secs / 60))
        .collect()
}

impl ReporterConfig {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> ReporterResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ReporterError::io(path, e))?;

        let config = Self::from_toml(&content).map_err(|e| match e {
            ReporterError::Config(message) => {
                ReporterError::config(format!("{}: {}", path.display(), message))
            }
            other => other,
        })?;

        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn from_toml(content: &str) -> ReporterResult<Self> {
        let config: ReporterConfig =
            toml::from_str(content).map_err(|e| ReporterError::config(format!("parse error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> ReporterResult<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| ReporterError::config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content).map_err(|e| ReporterError::io(path, e))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ReporterResult<()> {
        self.source.validate()?;

        if self.pool.id.trim().is_empty() {
            return Err(ReporterError::config("pool.id must not be empty"));
        }

        if self.windows.is_empty() {
            return Err(ReporterError::config("at least one [[windows]] entry is required"));
        }

        let mut labels = HashSet::new();
        for window in &self.windows {
            if window.label.trim().is_empty() {
                return Err(ReporterError::config("window labels must not be empty"));
            }
            if window.duration_secs <= 0 {
                return Err(ReporterError::config(format!(
                    "window '{}' has duration {}s, expected greater than 0",
                    window.label, window.duration_secs
                )));
            }
            if !labels.insert(window.label.as_str()) {
                return Err(ReporterError::config(format!("duplicate window label '{}'", window.label)));
            }
        }

        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(ReporterError::config(format!(
                "chart size {}x{} must be positive",
                self.chart.width, self.chart.height
            )));
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(ReporterError::config("output.path must not be empty"));
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ReporterError::config(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Title from config, falling back to the pool name or id
    pub fn chart_title(&self) -> String {
        match &self.chart.title {
            Some(title) => title.clone(),
            None => format!("{} TWAP", self.pool.name.as_deref().unwrap_or(&self.pool.id)),
        }
    }
}

impl SourceConfig {
    fn validate(&self) -> ReporterResult<()> {
        if self.fixture.is_none() && self.endpoint.trim().is_empty() {
            return Err(ReporterError::config("source.endpoint must not be empty"));
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ReporterError::config(format!(
                "source.page_size {} must be between 1 and {}",
                self.page_size, MAX_PAGE_SIZE
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ReporterError::config("source.request_timeout_secs must be greater than 0"));
        }

        self.retry.validate().map_err(ReporterError::Config)
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            pool: PoolConfig {
                id: "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640".to_string(),
                name: Some("USDC/WETH 0.05%".to_string()),
            },
            // USDC (6 decimals) / WETH (18 decimals), quoted in USDC per WETH
            price: PriceConvention::from_token_decimals(6, 18, true),
            windows: default_windows(),
            chart: ChartConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.thegraph.com/subgraphs/name/uniswap/uniswap-v3".to_string(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout(),
            retry: RetryConfig::default(),
            fixture: None,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: None,
            theme: Theme::Dark,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            x_axis: XAxisLabel::Block,
            y_value: YValue::Price,
            format: ChartFormat::Svg,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("twap.svg"),
            series_json: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            structured: false,
        }
    }
}

/// Create example configuration file
pub fn create_example_config(path: impl AsRef<Path>) -> ReporterResult<()> {
    let mut example_config = ReporterConfig::default();
    example_config.chart.title = Some("USDC/WETH TWAP".to_string());
    example_config.output.series_json = Some(PathBuf::from("twap-series.json"));

    example_config.save(path)?;
    Ok(())
}
