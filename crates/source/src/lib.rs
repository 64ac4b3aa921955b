//! # Tickwap Source - Tick Event Sources
//!
//! Everything that produces the raw tick events the engine consumes:
//!
//! - [`TickEventSource`], the seam the reporter fetches through
//! - [`SubgraphSource`], exhaustive cursor pagination over a GraphQL index
//! - [`HttpTransport`], the reqwest transport for it
//! - [`StaticSource`], fixed events for offline runs and fixtures
//!
//! Sources either return every event of a pool, ordered by
//! `(timestamp, block, logIndex)`, or fail with a [`DataSourceError`].
//! Retrying transient failures is the source's job, never the engine's.

pub mod error;
pub mod event;
pub mod retry;
pub mod static_source;
pub mod subgraph;
pub mod transport;

use async_trait::async_trait;
use tickwap_core::TickEvent;

// Re-export commonly used items
pub use error::{DataSourceError, SourceResult};
pub use event::{sort_events, NumberLike, RawTickEvent};
pub use retry::RetryConfig;
pub use static_source::StaticSource;
pub use subgraph::{tick_page_request, SubgraphSource, MAX_PAGE_SIZE, TICK_EVENTS_QUERY};
pub use transport::{parse_response, GraphQlRequest, GraphTransport, HttpTransport};

/// Provider of every tick event of a pool
#[async_trait]
pub trait TickEventSource: Send + Sync {
    /// All events of `pool`, time-ordered, or an explicit failure
    async fn fetch_tick_events(&self, pool: &str) -> SourceResult<Vec<TickEvent>>;
}
