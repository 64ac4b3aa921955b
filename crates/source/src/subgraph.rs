//! # Subgraph Source
//!
//! Exhaustive, cursor-paginated fetch of every tick event of one pool.
//!
//! Pages are requested in ascending `id` order with `id_gt` set to the last
//! id of the previous page, starting from the empty string. A page shorter
//! than the page size ends the fetch. The index orders by id, not by time,
//! so the collected events are sorted by `(timestamp, block, logIndex)`
//! before they are returned.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tickwap_core::TickEvent;
use tracing::{debug, info};

use crate::error::{DataSourceError, SourceResult};
use crate::event::{sort_events, RawTickEvent};
use crate::retry::RetryConfig;
use crate::transport::{GraphQlRequest, GraphTransport};
use crate::TickEventSource;

/// Largest page the hosted subgraph service accepts
pub const MAX_PAGE_SIZE: usize = 1000;

pub const TICK_EVENTS_QUERY: &str = r#"query TickEvents($pool: String!, $first: Int!, $cursor: String!) {
  ticks(first: $first, where: { pool: $pool, id_gt: $cursor }, orderBy: id, orderDirection: asc) {
    id
    tick
    timestamp
    blockNumber
    logIndex
    transactionLogIndex
    initialTick
  }
}"#;

#[derive(Debug, Deserialize)]
struct TickPage {
    ticks: Vec<RawTickEvent>,
}

/// Page request for `pool` after `cursor`
pub fn tick_page_request(pool: &str, page_size: usize, cursor: &str) -> GraphQlRequest {
    GraphQlRequest {
        query: TICK_EVENTS_QUERY.to_string(),
        variables: json!({
            "pool": pool,
            "first": page_size,
            "cursor": cursor,
        }),
    }
}

/// Tick events from a GraphQL index
#[derive(Debug, Clone)]
pub struct SubgraphSource<T> {
    transport: T,
    page_size: usize,
    retry: RetryConfig,
}

impl<T: GraphTransport> SubgraphSource<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            page_size: MAX_PAGE_SIZE,
            retry: RetryConfig::default(),
        }
    }

    /// Events per page, clamped to `1..=MAX_PAGE_SIZE`
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn fetch_page(&self, pool: &str, cursor: &str) -> SourceResult<Vec<RawTickEvent>> {
        let request = tick_page_request(pool, self.page_size, cursor);
        let data = self
            .retry
            .run("tick page request", || self.transport.execute(&request))
            .await?;

        let page: TickPage = serde_json::from_value(data)?;
        Ok(page.ticks)
    }
}

#[async_trait]
impl<T: GraphTransport> TickEventSource for SubgraphSource<T> {
    async fn fetch_tick_events(&self, pool: &str) -> SourceResult<Vec<TickEvent>> {
        let mut cursor = String::new();
        let mut events = Vec::new();
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page(pool, &cursor).await?;
            pages += 1;
            let page_len = page.len();
            debug!("pool {} page {}: {} events after '{}'", pool, pages, page_len, cursor);

            if let Some(last) = page.last() {
                if last.id == cursor {
                    return Err(DataSourceError::CursorStalled { cursor });
                }
                cursor = last.id.clone();
            }

            for raw in page {
                events.push(raw.into_event()?);
            }

            if page_len < self.page_size {
                break;
            }
        }

        sort_events(&mut events);
        info!("Fetched {} tick events for pool {} in {} pages", events.len(), pool, pages);
        Ok(events)
    }
}
