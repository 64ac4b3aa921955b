//! Error types for chart building and rendering

use thiserror::Error;

/// Result alias for chart operations
pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Chart has no data points")]
    EmptyChart,

    #[error("Series '{series}' has {labels} labels but {values} values")]
    SeriesLengthMismatch {
        series: String,
        labels: usize,
        values: usize,
    },

    #[error("Series '{series}' has a non-finite value at index {index}")]
    NonFiniteValue { series: String, index: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Serialization(err.to_string())
    }
}

impl From<std::fmt::Error> for ChartError {
    fn from(err: std::fmt::Error) -> Self {
        ChartError::Serialization(err.to_string())
    }
}
