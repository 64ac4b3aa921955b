//! # Wire Format
//!
//! Tick events as the subgraph returns them. Numeric fields arrive as JSON
//! strings (the subgraph's `BigInt`/`BigDecimal` scalars) or, from fixtures,
//! as plain JSON numbers; both decode.

use std::str::FromStr;

use serde::Deserialize;
use tickwap_core::{BigDecimal, TickEvent};

use crate::error::{DataSourceError, SourceResult};

/// Numeric scalar encoded as a string or a JSON number
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberLike {
    Text(String),
    Number(serde_json::Number),
}

impl NumberLike {
    fn text(&self) -> String {
        match self {
            NumberLike::Text(text) => text.trim().to_string(),
            NumberLike::Number(number) => number.to_string(),
        }
    }

    fn decimal(&self, id: &str, field: &str) -> SourceResult<BigDecimal> {
        BigDecimal::from_str(&self.text()).map_err(|e| DataSourceError::decode_field(id, field, e))
    }

    fn integer<N: FromStr>(&self, id: &str, field: &str) -> SourceResult<N>
    where
        N::Err: std::fmt::Display,
    {
        self.text()
            .parse::<N>()
            .map_err(|e| DataSourceError::decode_field(id, field, e))
    }
}

/// One `ticks` entity in subgraph wire format
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTickEvent {
    pub id: String,
    pub tick: NumberLike,
    pub timestamp: NumberLike,
    pub block_number: NumberLike,
    pub log_index: NumberLike,
    pub transaction_log_index: NumberLike,
    pub initial_tick: NumberLike,
}

impl RawTickEvent {
    /// Decode every numeric field into an engine event
    pub fn into_event(self) -> SourceResult<TickEvent> {
        let id = self.id.as_str();
        Ok(TickEvent {
            tick: self.tick.decimal(id, "tick")?,
            timestamp: self.timestamp.integer(id, "timestamp")?,
            block_number: self.block_number.integer(id, "blockNumber")?,
            log_index: self.log_index.integer(id, "logIndex")?,
            transaction_log_index: self.transaction_log_index.integer(id, "transactionLogIndex")?,
            initial_tick: self.initial_tick.decimal(id, "initialTick")?,
            id: self.id,
        })
    }
}

/// Order events by `(timestamp, block, logIndex)`, keeping ties stable
pub fn sort_events(events: &mut [TickEvent]) {
    events.sort_by_key(|e| (e.timestamp, e.block_number, e.log_index));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> SourceResult<TickEvent> {
        serde_json::from_value::<RawTickEvent>(value)?.into_event()
    }

    #[test]
    fn test_decodes_string_scalars() {
        let event = decode(json!({
            "id": "0xabc-12",
            "tick": "-201234",
            "timestamp": "1690000000",
            "blockNumber": "17700000",
            "logIndex": "12",
            "transactionLogIndex": "3",
            "initialTick": "-201200"
        }))
        .unwrap();

        assert_eq!(event.id, "0xabc-12");
        assert_eq!(event.tick, BigDecimal::from(-201234));
        assert_eq!(event.timestamp, 1_690_000_000);
        assert_eq!(event.block_number, 17_700_000);
        assert_eq!(event.log_index, 12);
        assert_eq!(event.transaction_log_index, 3);
        assert_eq!(event.initial_tick, BigDecimal::from(-201200));
    }

    #[test]
    fn test_decodes_number_scalars() {
        let event = decode(json!({
            "id": "1",
            "tick": -5,
            "timestamp": 100,
            "blockNumber": 7,
            "logIndex": 0,
            "transactionLogIndex": 0,
            "initialTick": "-5.00"
        }))
        .unwrap();

        assert_eq!(event.tick, BigDecimal::from(-5));
        assert_eq!(event.initial_tick, BigDecimal::from(-5));
        assert_eq!(event.timestamp, 100);
    }

    #[test]
    fn test_bad_field_names_event_and_field() {
        let err = decode(json!({
            "id": "0xdead",
            "tick": "not-a-number",
            "timestamp": "1",
            "blockNumber": "1",
            "logIndex": "1",
            "transactionLogIndex": "1",
            "initialTick": "0"
        }))
        .unwrap_err();

        match err {
            DataSourceError::Decode(message) => {
                assert!(message.contains("0xdead"));
                assert!(message.contains("tick"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_negative_log_index_rejected() {
        let err = decode(json!({
            "id": "1",
            "tick": "0",
            "timestamp": "1",
            "blockNumber": "1",
            "logIndex": "-1",
            "transactionLogIndex": "0",
            "initialTick": "0"
        }));
        assert!(matches!(err, Err(DataSourceError::Decode(_))));
    }

    #[test]
    fn test_sort_orders_by_time_then_block_then_log() {
        let event = |id: &str, timestamp: i64, block: u64, log: u64| TickEvent {
            id: id.to_string(),
            tick: BigDecimal::from(0),
            timestamp,
            block_number: block,
            log_index: log,
            transaction_log_index: 0,
            initial_tick: BigDecimal::from(0),
        };
        let mut events = vec![
            event("d", 20, 2, 0),
            event("b", 10, 1, 5),
            event("a", 10, 1, 1),
            event("c", 10, 1, 5),
        ];
        sort_events(&mut events);

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }
}
