//! Error types for tick event sources

use thiserror::Error;

/// Result alias for data source operations
pub type SourceResult<T> = Result<T, DataSourceError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataSourceError {
    // ========================================================================
    // Transport Errors
    // ========================================================================
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Subgraph responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    // ========================================================================
    // Data Errors
    // ========================================================================
    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Pagination cursor did not advance past {cursor}")]
    CursorStalled { cursor: String },

    #[error("Gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        attempts: u32,
        last_error: Box<DataSourceError>,
    },
}

impl DataSourceError {
    /// Create a decode error for one field of one event
    pub fn decode_field(id: &str, field: &str, reason: impl std::fmt::Display) -> Self {
        DataSourceError::Decode(format!("event {}: field {}: {}", id, field, reason))
    }

    /// Whether repeating the same request could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            DataSourceError::Http(_) => true,
            DataSourceError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for DataSourceError {
    fn from(err: reqwest::Error) -> Self {
        DataSourceError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for DataSourceError {
    fn from(err: serde_json::Error) -> Self {
        DataSourceError::Decode(err.to_string())
    }
}
