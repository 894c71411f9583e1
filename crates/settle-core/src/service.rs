//! Block lifecycle service - core orchestration
//!
//! Drives the fixed per-block pipeline against the injected gateways:
//!
//! ```text
//! begin-block: aggregate power → per-block rewards → epoch status
//!              → epoch distribution + snapshot (boundary only)
//!              → previous-proposer update
//! end-block:   trade/match settlement → version-routed module hooks
//! ```
//!
//! The consensus engine guarantees strictly sequential, non-overlapping
//! begin/end delivery, height by height. The service still tracks a small
//! phase machine per height and treats any out-of-order or duplicate
//! delivery as a fatal sequencing violation: it means the driving engine
//! itself is broken and no local recovery is attempted. A fatal error
//! mid-pipeline leaves the phase machine in the failed phase on purpose -
//! the whole block's state transition is aborted by the storage layer's
//! all-or-nothing commit and the process is expected to halt.

use crate::config::SettlementConfig;
use crate::domain::epoch::epoch_status;
use crate::domain::settlement::{build_records, fold_klines};
use crate::domain::voting_power::aggregate_power;
use crate::error::{SettlementError, SettlementResult};
use crate::events::{BeginBlockEvent, EndBlockEvent, EventTag};
use crate::ports::inbound::{BlockLifecycleApi, Page};
use crate::ports::outbound::{OrderBookGateway, SettlementStore, TokenLedgerGateway};
use crate::router::{ModuleKind, ModuleMessage, VersionRouter};
use async_trait::async_trait;
use parking_lot::RwLock;
use settle_types::{Address, Height, KLineMin, Match, MatchResult, Timestamp, Trade};
use std::collections::BTreeMap;
use std::num::NonZeroU64;
use std::sync::Arc;

/// Per-height processing phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LifecyclePhase {
    Idle,
    BeginBlockRunning(Height),
    EndBlockRunning(Height),
}

struct LifecycleState {
    phase: LifecyclePhase,
    /// Height whose begin-block completed and end-block is pending.
    begun: Option<Height>,
    /// Block timestamp delivered at begin-block for `begun`.
    begun_timestamp: Timestamp,
    /// Last height whose end-block completed.
    last_finished: Option<Height>,
}

impl LifecycleState {
    fn new() -> Self {
        Self {
            phase: LifecyclePhase::Idle,
            begun: None,
            begun_timestamp: 0,
            last_finished: None,
        }
    }
}

/// Block lifecycle coordinator over the injected collaborators.
pub struct BlockLifecycleService<T, O, S>
where
    T: TokenLedgerGateway,
    O: OrderBookGateway,
    S: SettlementStore,
{
    epoch_interval: NonZeroU64,
    kline_bucket: NonZeroU64,
    router: VersionRouter,
    state: Arc<RwLock<LifecycleState>>,
    ledger: Arc<T>,
    orders: Arc<O>,
    store: Arc<S>,
}

impl<T, O, S> BlockLifecycleService<T, O, S>
where
    T: TokenLedgerGateway,
    O: OrderBookGateway,
    S: SettlementStore,
{
    /// Create a new lifecycle service.
    ///
    /// Fails with a configuration error on a non-positive epoch interval or
    /// KLine bucket width.
    pub fn new(
        config: SettlementConfig,
        router: VersionRouter,
        ledger: Arc<T>,
        orders: Arc<O>,
        store: Arc<S>,
    ) -> SettlementResult<Self> {
        Ok(Self {
            epoch_interval: config.epoch.interval()?,
            kline_bucket: config.kline.bucket()?,
            router,
            state: Arc::new(RwLock::new(LifecycleState::new())),
            ledger,
            orders,
            store,
        })
    }

    /// The injected version router.
    pub fn router(&self) -> &VersionRouter {
        &self.router
    }

    /// Route a protocol message through the version table.
    pub async fn deliver_message(
        &self,
        height: Height,
        module: ModuleKind,
        message: &ModuleMessage,
    ) -> SettlementResult<Vec<EventTag>> {
        self.router.dispatch_message(height, module, message).await
    }

    fn enter_begin(&self, height: Height) -> SettlementResult<()> {
        let mut state = self.state.write();
        if state.phase != LifecyclePhase::Idle {
            return Err(SettlementError::sequencing(format!(
                "begin-block for height {height} delivered while {:?}",
                state.phase
            )));
        }
        if let Some(begun) = state.begun {
            return Err(SettlementError::sequencing(format!(
                "begin-block for height {height} before end-block for height {begun}"
            )));
        }
        if let Some(last) = state.last_finished {
            if height <= last {
                return Err(SettlementError::sequencing(format!(
                    "begin-block for height {height} after height {last} already finished"
                )));
            }
        }
        state.phase = LifecyclePhase::BeginBlockRunning(height);
        Ok(())
    }

    fn enter_end(&self, height: Height) -> SettlementResult<Timestamp> {
        let mut state = self.state.write();
        if state.phase != LifecyclePhase::Idle {
            return Err(SettlementError::sequencing(format!(
                "end-block for height {height} delivered while {:?}",
                state.phase
            )));
        }
        if state.begun != Some(height) {
            return Err(SettlementError::sequencing(format!(
                "end-block for height {height} whose begin-block has not completed"
            )));
        }
        state.phase = LifecyclePhase::EndBlockRunning(height);
        Ok(state.begun_timestamp)
    }

    /// Resolve each deal's originating order sender, once per order id.
    async fn resolve_senders(
        &self,
        results: &BTreeMap<String, MatchResult>,
    ) -> SettlementResult<BTreeMap<String, Address>> {
        let mut senders = BTreeMap::new();
        for result in results.values() {
            for deal in &result.deals {
                if senders.contains_key(&deal.order_id) {
                    continue;
                }
                let sender = self
                    .orders
                    .order_sender(&deal.order_id)
                    .await?
                    .ok_or_else(|| SettlementError::UnknownOrder {
                        order_id: deal.order_id.clone(),
                    })?;
                senders.insert(deal.order_id.clone(), sender);
            }
        }
        Ok(senders)
    }
}

#[async_trait]
impl<T, O, S> BlockLifecycleApi for BlockLifecycleService<T, O, S>
where
    T: TokenLedgerGateway + 'static,
    O: OrderBookGateway + 'static,
    S: SettlementStore + 'static,
{
    async fn on_begin_block(&self, event: BeginBlockEvent) -> SettlementResult<Vec<EventTag>> {
        let height = event.height;
        self.enter_begin(height)?;

        let totals = aggregate_power(&event.last_commit_votes);
        let mut tags = Vec::new();

        // The proposer credited here is the one who proposed block N-1; the
        // genesis and first block have no prior committed proposer to reward.
        if height > 1 {
            let previous = self.ledger.previous_proposer().await?;
            self.ledger
                .allocate_tokens(
                    totals.precommit_power,
                    totals.total_power,
                    previous,
                    &event.last_commit_votes,
                )
                .await?;
            tags.push(EventTag::rewards_allocated(previous));
        }

        let status = epoch_status(height, self.epoch_interval);
        if status.is_epoch_end {
            tracing::info!(height, "epoch boundary: distributing rewards and snapshotting");
            // Distribute before snapshotting; the snapshot must capture
            // post-distribution balances or the audit trail is corrupt.
            self.ledger.distribute_all_rewards().await?;
            self.ledger.snapshot_validators().await?;
            tags.push(EventTag::epoch_settled(height));
        } else {
            tracing::debug!(height, blocks_remaining = status.blocks_remaining, "epoch progress");
        }

        self.ledger.set_previous_proposer(event.proposer).await?;

        let mut state = self.state.write();
        state.phase = LifecyclePhase::Idle;
        state.begun = Some(height);
        state.begun_timestamp = event.timestamp;
        Ok(tags)
    }

    async fn on_end_block(&self, event: EndBlockEvent) -> SettlementResult<Vec<EventTag>> {
        let height = event.height;
        let timestamp = self.enter_end(height)?;

        let results = self.orders.match_results(height).await?;
        let senders = self.resolve_senders(&results).await?;
        let (matches, trades) = build_records(height, timestamp, &results, &senders)?;

        let mut tags = Vec::with_capacity(matches.len());
        for record in &matches {
            let count = trades.iter().filter(|t| t.product == record.product).count();
            tags.push(EventTag::product_settled(&record.product, count));
        }

        for record in matches {
            self.store.append_match(record).await?;
        }
        let bars = fold_klines(&trades, self.kline_bucket);
        self.store.append_trades(trades).await?;
        for bar in bars {
            self.store.upsert_kline(bar).await?;
        }

        // Hook failures never abort finalization; the router fails closed.
        tags.extend(self.router.dispatch_end_block(height).await);

        let mut state = self.state.write();
        state.phase = LifecyclePhase::Idle;
        state.begun = None;
        state.last_finished = Some(height);
        Ok(tags)
    }

    async fn trade_history(
        &self,
        sender: Address,
        page: u32,
        per_page: u32,
    ) -> SettlementResult<Page<Trade>> {
        let mut trades = self.store.trades_by_sender(sender).await?;
        trades.sort_by(|a, b| {
            b.block_height
                .cmp(&a.block_height)
                .then_with(|| a.order_id.cmp(&b.order_id))
        });
        let total = trades.len() as u64;

        if page == 0 || per_page == 0 {
            return Ok(Page::empty(page, per_page, total));
        }
        let start = (page as usize - 1).saturating_mul(per_page as usize);
        if start >= trades.len() {
            return Ok(Page::empty(page, per_page, total));
        }
        let items = trades
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .collect();
        Ok(Page {
            items,
            page,
            per_page,
            total,
        })
    }

    async fn kline_history(
        &self,
        product: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> SettlementResult<Vec<KLineMin>> {
        self.store.klines_in_range(product, from, to).await
    }

    async fn match_history(
        &self,
        product: &str,
        from: Timestamp,
        to: Timestamp,
    ) -> SettlementResult<Vec<Match>> {
        self.store.matches_in_range(product, from, to).await
    }
}
