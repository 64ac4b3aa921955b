//! Error types for the reporter

use std::path::{Path, PathBuf};

use thiserror::Error;
use tickwap_chart::ChartError;
use tickwap_core::TwapError;
use tickwap_source::DataSourceError;

/// Result alias for reporter operations
pub type ReporterResult<T> = Result<T, ReporterError>;

#[derive(Error, Debug)]
pub enum ReporterError {
    #[error("TWAP computation failed: {0}")]
    Twap(#[from] TwapError),

    #[error("Tick event fetch failed: {0}")]
    Source(#[from] DataSourceError),

    #[error("Chart rendering failed: {0}")]
    Chart(#[from] ChartError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Window evaluation task failed: {0}")]
    Join(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl ReporterError {
    pub fn config(message: impl Into<String>) -> Self {
        ReporterError::Config(message.into())
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ReporterError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for ReporterError {
    fn from(err: serde_json::Error) -> Self {
        ReporterError::Serialization(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ReporterError {
    fn from(err: tokio::task::JoinError) -> Self {
        ReporterError::Join(err.to_string())
    }
}
