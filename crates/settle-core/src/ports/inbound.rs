//! Driving ports (inbound API)

use crate::error::SettlementResult;
use crate::events::{BeginBlockEvent, EndBlockEvent, EventTag};
use async_trait::async_trait;
use settle_types::{Address, KLineMin, Match, Timestamp, Trade};

/// One page of a paginated query result.
///
/// Out-of-range pages are represented as an empty page, never as an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested.
    pub page: u32,
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty(page: u32, per_page: u32, total: u64) -> Self {
        Self {
            items: Vec::new(),
            page,
            per_page,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Primary block lifecycle API.
///
/// The consensus engine drives `on_begin_block`/`on_end_block` strictly
/// sequentially, height by height; the query surface serves the read API.
#[async_trait]
pub trait BlockLifecycleApi: Send + Sync {
    /// Run the begin-block pipeline: power aggregation, per-block reward
    /// allocation, epoch detection and (on a boundary) epoch allocation,
    /// then the previous-proposer update.
    async fn on_begin_block(&self, event: BeginBlockEvent) -> SettlementResult<Vec<EventTag>>;

    /// Run the end-block pipeline: trade/match settlement followed by the
    /// version-routed module end-block hooks.
    async fn on_end_block(&self, event: EndBlockEvent) -> SettlementResult<Vec<EventTag>>;

    /// Paginated trade history for a sender, newest first.
    async fn trade_history(
        &self,
        sender: Address,
        page: u32,
        per_page: u32,
    ) -> SettlementResult<Page<Trade>>;

    /// KLine bars for a product over a bucket-start range.
    async fn kline_history(
        &self,
        product: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> SettlementResult<Vec<KLineMin>>;

    /// Match records for a product over a timestamp range.
    async fn match_history(
        &self,
        product: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> SettlementResult<Vec<Match>>;
}
