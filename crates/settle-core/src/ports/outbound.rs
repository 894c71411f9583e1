//! Driven ports (outbound dependencies)
//!
//! The collaborators this core consumes but never implements: the
//! token/staking ledger, the order/matching subsystem and the settlement
//! record store. Each is a trait so tests can substitute mocks and the
//! process wiring can substitute real adapters.

use crate::error::SettlementResult;
use async_trait::async_trait;
use settle_types::{Address, Height, KLineMin, Match, MatchResult, Timestamp, Trade, VoteRecord};
use std::collections::BTreeMap;

/// Token and staking ledger operations.
///
/// Reward-pool balances and validator/delegation snapshots live behind this
/// boundary; this core only drives the calls in the right order.
#[async_trait]
pub trait TokenLedgerGateway: Send + Sync {
    /// Distribute one block's rewards proportionally to
    /// `precommit_power / total_power` and the previous proposer's bonus.
    async fn allocate_tokens(
        &self,
        precommit_power: u64,
        total_power: u64,
        previous_proposer: Address,
        votes: &[VoteRecord],
    ) -> SettlementResult<()>;

    /// Full redistribution of the accumulated reward pool across all
    /// validators and delegators.
    async fn distribute_all_rewards(&self) -> SettlementResult<()>;

    /// Snapshot the complete validator set and every active delegation, for
    /// later audit against the state as of the epoch boundary.
    async fn snapshot_validators(&self) -> SettlementResult<()>;

    /// Proposer credited for the next block's allocation.
    async fn previous_proposer(&self) -> SettlementResult<Address>;

    /// Overwrite the persisted previous-proposer value.
    async fn set_previous_proposer(&self, proposer: Address) -> SettlementResult<()>;
}

/// Order book and matching subsystem lookups.
#[async_trait]
pub trait OrderBookGateway: Send + Sync {
    /// Sender of the order with this id, if the order exists.
    async fn order_sender(&self, order_id: &str) -> SettlementResult<Option<Address>>;

    /// Match results produced for a height, keyed by product.
    async fn match_results(&self, height: Height)
        -> SettlementResult<BTreeMap<String, MatchResult>>;
}

/// Persistence for settlement facts.
///
/// Trade/Match writes are append-only; `upsert_kline` merges into the
/// derived per-bucket index and is the only non-append operation.
#[async_trait]
pub trait SettlementStore: Send + Sync {
    async fn append_match(&self, record: Match) -> SettlementResult<()>;

    async fn append_trades(&self, records: Vec<Trade>) -> SettlementResult<()>;

    /// Merge a bar into the (product, bucket) slot, creating it if absent.
    async fn upsert_kline(&self, bar: KLineMin) -> SettlementResult<()>;

    /// All trades sent by `sender`, in insertion order.
    async fn trades_by_sender(&self, sender: Address) -> SettlementResult<Vec<Trade>>;

    /// KLine bars for a product whose bucket start falls in `[from, to]`.
    async fn klines_in_range(
        &self,
        product: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> SettlementResult<Vec<KLineMin>>;

    /// Matches for a product whose timestamp falls in `[from, to]`.
    async fn matches_in_range(
        &self,
        product: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> SettlementResult<Vec<Match>>;
}
