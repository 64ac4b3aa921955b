//! # GraphQL Transport
//!
//! One request in, the response's `data` object out. Everything that is not
//! a usable `data` object (HTTP failures, non-success status, a GraphQL
//! `errors` array, a missing `data` field) becomes a [`DataSourceError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{DataSourceError, SourceResult};

/// GraphQL request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

/// Sends GraphQL requests to an index
#[async_trait]
pub trait GraphTransport: Send + Sync {
    /// Execute `request` and return the `data` object of the response
    async fn execute(&self, request: &GraphQlRequest) -> SourceResult<Value>;
}

/// Decode a raw GraphQL response body into its `data` object
pub fn parse_response(body: &[u8]) -> SourceResult<Value> {
    let response: GraphQlResponse = serde_json::from_slice(body)?;

    if !response.errors.is_empty() {
        return Err(DataSourceError::GraphQl(
            response.errors.into_iter().map(|e| e.message).collect(),
        ));
    }

    match response.data {
        Some(Value::Null) | None => Err(DataSourceError::Decode(
            "response carries no data field".to_string(),
        )),
        Some(data) => Ok(data),
    }
}

/// reqwest-backed transport posting to a single endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GraphTransport for HttpTransport {
    async fn execute(&self, request: &GraphQlRequest) -> SourceResult<Value> {
        debug!("POST {}", self.endpoint);

        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataSourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_is_returned() {
        let data = parse_response(br#"{"data": {"ticks": []}}"#).unwrap();
        assert_eq!(data, json!({ "ticks": [] }));
    }

    #[test]
    fn test_graphql_errors_win_over_partial_data() {
        let err = parse_response(
            br#"{"data": {"ticks": []}, "errors": [{"message": "indexing_error"}]}"#,
        )
        .unwrap_err();
        assert_eq!(err, DataSourceError::GraphQl(vec!["indexing_error".to_string()]));
    }

    #[test]
    fn test_missing_data_is_an_error() {
        assert!(matches!(parse_response(br#"{}"#), Err(DataSourceError::Decode(_))));
        assert!(matches!(
            parse_response(br#"{"data": null}"#),
            Err(DataSourceError::Decode(_))
        ));
    }

    #[test]
    fn test_non_json_body_is_an_error() {
        assert!(matches!(
            parse_response(b"<html>gateway</html>"),
            Err(DataSourceError::Decode(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let request = GraphQlRequest {
            query: "{ ticks { id } }".to_string(),
            variables: json!({ "first": 10 }),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "query": "{ ticks { id } }", "variables": { "first": 10 } })
        );
    }
}
