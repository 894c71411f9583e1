//! In-memory settlement store
//!
//! Default store adapter: append-only vectors for Trade/Match plus a
//! per-(product, bucket) map for the derived KLine index. Durable encodings
//! live behind other adapters; this one backs tests and single-process
//! runs.

use crate::error::SettlementResult;
use crate::ports::outbound::SettlementStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use settle_types::{Address, KLineMin, Match, Timestamp, Trade};
use std::collections::BTreeMap;

#[derive(Default)]
struct StoreInner {
    trades: Vec<Trade>,
    matches: Vec<Match>,
    /// product -> bucket start -> bar
    klines: BTreeMap<String, BTreeMap<Timestamp, KLineMin>>,
}

/// In-memory `SettlementStore` implementation.
#[derive(Default)]
pub struct InMemorySettlementStore {
    inner: RwLock<StoreInner>,
}

impl InMemorySettlementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted trades, across all senders.
    pub fn trade_count(&self) -> usize {
        self.inner.read().trades.len()
    }

    /// Number of persisted matches, across all products.
    pub fn match_count(&self) -> usize {
        self.inner.read().matches.len()
    }
}

#[async_trait]
impl SettlementStore for InMemorySettlementStore {
    async fn append_match(&self, record: Match) -> SettlementResult<()> {
        self.inner.write().matches.push(record);
        Ok(())
    }

    async fn append_trades(&self, records: Vec<Trade>) -> SettlementResult<()> {
        self.inner.write().trades.extend(records);
        Ok(())
    }

    async fn upsert_kline(&self, bar: KLineMin) -> SettlementResult<()> {
        let mut inner = self.inner.write();
        let buckets = inner.klines.entry(bar.product.clone()).or_default();
        match buckets.get_mut(&bar.bucket_start) {
            Some(existing) => existing.merge(&bar),
            None => {
                buckets.insert(bar.bucket_start, bar);
            }
        }
        Ok(())
    }

    async fn trades_by_sender(&self, sender: Address) -> SettlementResult<Vec<Trade>> {
        Ok(self
            .inner
            .read()
            .trades
            .iter()
            .filter(|t| t.sender == sender)
            .cloned()
            .collect())
    }

    async fn klines_in_range(
        &self,
        product: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> SettlementResult<Vec<KLineMin>> {
        Ok(self
            .inner
            .read()
            .klines
            .get(product)
            .map(|buckets| buckets.range(from..=to).map(|(_, bar)| bar.clone()).collect())
            .unwrap_or_default())
    }

    async fn matches_in_range(
        &self,
        product: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> SettlementResult<Vec<Match>> {
        Ok(self
            .inner
            .read()
            .matches
            .iter()
            .filter(|m| m.product == product && (from..=to).contains(&m.timestamp))
            .cloned()
            .collect())
    }
}
