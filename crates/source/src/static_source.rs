use async_trait::async_trait;
use serde::Deserialize;
use tickwap_core::TickEvent;
use tracing::debug;

use crate::error::SourceResult;
use crate::event::{sort_events, RawTickEvent};
use crate::TickEventSource;

/// Fixture documents are either a bare event array or a `{ "ticks": [...] }`
/// object as captured from the subgraph
#[derive(Deserialize)]
#[serde(untagged)]
enum Fixture {
    Events(Vec<RawTickEvent>),
    Page { ticks: Vec<RawTickEvent> },
}

/// In-memory source over a fixed event list
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pool: Option<String>,
    events: Vec<TickEvent>,
}

impl StaticSource {
    /// Serve `events` for every pool
    pub fn new(mut events: Vec<TickEvent>) -> Self {
        sort_events(&mut events);
        Self { pool: None, events }
    }

    /// Serve `events` for `pool` only; any other pool has no events
    pub fn for_pool(pool: impl Into<String>, events: Vec<TickEvent>) -> Self {
        Self {
            pool: Some(pool.into()),
            ..Self::new(events)
        }
    }

    /// Decode a fixture in subgraph wire format
    pub fn from_json_str(json: &str) -> SourceResult<Self> {
        let raw = match serde_json::from_str::<Fixture>(json)? {
            Fixture::Events(events) | Fixture::Page { ticks: events } => events,
        };

        let events = raw
            .into_iter()
            .map(RawTickEvent::into_event)
            .collect::<SourceResult<Vec<_>>>()?;
        Ok(Self::new(events))
    }

    pub fn events(&self) -> &[TickEvent] {
        &self.events
    }
}

#[async_trait]
impl TickEventSource for StaticSource {
    async fn fetch_tick_events(&self, pool: &str) -> SourceResult<Vec<TickEvent>> {
        match &self.pool {
            Some(served) if served != pool => {
                debug!("static source serves {}, not {}", served, pool);
                Ok(Vec::new())
            }
            _ => Ok(self.events.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataSourceError;
    use tickwap_core::BigDecimal;

    const FIXTURE: &str = r#"[
        {"id": "b", "tick": "-7", "timestamp": "200", "blockNumber": "20", "logIndex": "0", "transactionLogIndex": "0", "initialTick": "-5"},
        {"id": "a", "tick": "-6", "timestamp": "100", "blockNumber": "10", "logIndex": "3", "transactionLogIndex": "1", "initialTick": "-5"}
    ]"#;

    #[tokio::test]
    async fn test_fixture_is_decoded_and_sorted() {
        let source = StaticSource::from_json_str(FIXTURE).unwrap();
        let events = source.fetch_tick_events("any").await.unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "a");
        assert_eq!(events[0].tick, BigDecimal::from(-6));
        assert_eq!(events[1].timestamp, 200);
    }

    #[test]
    fn test_page_shaped_fixture() {
        let json = format!(r#"{{"ticks": {}}}"#, FIXTURE);
        let source = StaticSource::from_json_str(&json).unwrap();
        assert_eq!(source.events().len(), 2);
    }

    #[test]
    fn test_malformed_fixture() {
        let result = StaticSource::from_json_str(r#"{"pools": []}"#);
        assert!(matches!(result, Err(DataSourceError::Decode(_))));
    }

    #[tokio::test]
    async fn test_pool_scoped_source() {
        let events = StaticSource::from_json_str(FIXTURE).unwrap().events().to_vec();
        let source = StaticSource::for_pool("0xpool", events);

        assert_eq!(source.fetch_tick_events("0xpool").await.unwrap().len(), 2);
        assert!(source.fetch_tick_events("0xother").await.unwrap().is_empty());
    }
}
