//! Settlement record derivation
//!
//! Pure functions turning one block's match results into the Trade/Match
//! facts to persist, plus the KLine bars those trades produce. Products are
//! walked in `BTreeMap` key order and trades are sorted by
//! `(product, order_id)`, so the output is independent of any upstream map
//! iteration order.

use crate::error::{SettlementError, SettlementResult};
use settle_types::{Address, Height, KLineMin, Match, MatchResult, Timestamp, Trade};
use std::collections::BTreeMap;
use std::num::NonZeroU64;

/// Start of the bucket containing `timestamp`.
pub fn bucket_start(timestamp: Timestamp, bucket_secs: NonZeroU64) -> Timestamp {
    timestamp - timestamp % bucket_secs.get()
}

/// Derive the persisted records for one block's match results.
///
/// Exactly one `Match` per product and one `Trade` per deal, every trade
/// carrying its originating order's sender resolved via `senders`. A deal
/// referencing an order absent from `senders` means the order subsystem and
/// the matching engine disagree, which is fatal.
pub fn build_records(
    height: Height,
    timestamp: Timestamp,
    results: &BTreeMap<String, MatchResult>,
    senders: &BTreeMap<String, Address>,
) -> SettlementResult<(Vec<Match>, Vec<Trade>)> {
    let mut matches = Vec::with_capacity(results.len());
    let mut trades = Vec::new();

    for (product, result) in results {
        matches.push(Match {
            block_height: height,
            product: product.clone(),
            price: result.price,
            quantity: result.quantity,
            timestamp,
        });
        for deal in &result.deals {
            let sender = senders
                .get(&deal.order_id)
                .copied()
                .ok_or_else(|| SettlementError::UnknownOrder {
                    order_id: deal.order_id.clone(),
                })?;
            trades.push(Trade {
                block_height: height,
                product: product.clone(),
                order_id: deal.order_id.clone(),
                sender,
                price: result.price,
                quantity: deal.quantity,
                timestamp,
            });
        }
    }

    trades.sort_by(|a, b| (&a.product, &a.order_id).cmp(&(&b.product, &b.order_id)));
    Ok((matches, trades))
}

/// Fold one block's trades into per-(product, bucket) KLine bars.
///
/// Trades must already be in settlement order; within a bar, open/close
/// follow that order. Bars come back sorted by (product, bucket_start).
pub fn fold_klines(trades: &[Trade], bucket_secs: NonZeroU64) -> Vec<KLineMin> {
    let mut bars: BTreeMap<(String, Timestamp), KLineMin> = BTreeMap::new();
    for trade in trades {
        let start = bucket_start(trade.timestamp, bucket_secs);
        bars.entry((trade.product.clone(), start))
            .and_modify(|bar| bar.absorb(trade))
            .or_insert_with(|| KLineMin::open_from(trade, start));
    }
    bars.into_values().collect()
}
