//! Settlement record entities
//!
//! `MatchResult`/`DealRecord` are read-only inputs owned by the matching
//! subsystem. `Trade` and `Match` are the append-only facts this core
//! persists per block; `KLineMin` is the derived per-minute OHLCV index
//! folded from trades.

use crate::decimal::Decimal;
use crate::primitives::{Address, Height, Timestamp};
use serde::{Deserialize, Serialize};

/// One order's share of a product's match, as reported by the matching
/// engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealRecord {
    /// Identifier of the originating order.
    pub order_id: String,
    /// Quantity filled for this order.
    pub quantity: Decimal,
}

/// The matching engine's output for one product in one block.
///
/// The product key lives in the per-height `product -> MatchResult` map
/// delivered by the order subsystem.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Clearing price for the block.
    pub price: Decimal,
    /// Total matched quantity for the block.
    pub quantity: Decimal,
    /// Constituent deals, in the matching engine's emission order.
    pub deals: Vec<DealRecord>,
}

/// A persisted per-order settlement fact.
///
/// Created once at settlement, never mutated or deleted. Looked up by
/// sender and by (product, timestamp).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub block_height: Height,
    pub product: String,
    pub order_id: String,
    /// Sender of the originating order, resolved via the order subsystem.
    pub sender: Address,
    /// Clearing price of the enclosing match.
    pub price: Decimal,
    /// This deal's own filled quantity.
    pub quantity: Decimal,
    pub timestamp: Timestamp,
}

/// A persisted per-product settlement fact: one per product per block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub block_height: Height,
    pub product: String,
    pub price: Decimal,
    pub quantity: Decimal,
    pub timestamp: Timestamp,
}

/// Derived OHLCV bar aggregating one product's trades over a fixed time
/// bucket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KLineMin {
    pub product: String,
    /// Start of the bucket this bar covers (inclusive).
    pub bucket_start: Timestamp,
    /// Price of the first trade in the bucket.
    pub open: Decimal,
    /// Highest trade price in the bucket.
    pub high: Decimal,
    /// Lowest trade price in the bucket.
    pub low: Decimal,
    /// Price of the last trade in the bucket.
    pub close: Decimal,
    /// Sum of trade quantities in the bucket.
    pub volume: Decimal,
}

impl KLineMin {
    /// Open a bar from the bucket's first trade.
    pub fn open_from(trade: &Trade, bucket_start: Timestamp) -> Self {
        Self {
            product: trade.product.clone(),
            bucket_start,
            open: trade.price,
            high: trade.price,
            low: trade.price,
            close: trade.price,
            volume: trade.quantity,
        }
    }

    /// Fold one more trade of the same bucket into the bar.
    ///
    /// Trades must be absorbed in settlement order: `close` tracks the most
    /// recently absorbed trade.
    pub fn absorb(&mut self, trade: &Trade) {
        self.high = self.high.max(trade.price);
        self.low = self.low.min(trade.price);
        self.close = trade.price;
        self.volume = self.volume.saturating_add(trade.quantity);
    }

    /// Merge a later partial bar of the same bucket into this one.
    ///
    /// `open` stays from the earlier bar, `close` comes from the later one.
    pub fn merge(&mut self, later: &KLineMin) {
        self.high = self.high.max(later.high);
        self.low = self.low.min(later.low);
        self.close = later.close;
        self.volume = self.volume.saturating_add(later.volume);
    }
}
