//! Shared fixtures: mock gateways and a wired service builder

use async_trait::async_trait;
use parking_lot::Mutex;
use settle_core::{
    BeginBlockEvent, BlockLifecycleApi, BlockLifecycleService, EndBlockEvent, EpochConfig,
    InMemorySettlementStore, KLineConfig, OrderBookGateway, ProtocolVersion, SettlementConfig,
    SettlementResult, TokenLedgerGateway, VersionRouter, VersionTable,
};
use settle_types::{Address, Height, MatchResult, VoteRecord};
use std::collections::BTreeMap;
use std::sync::Arc;

pub fn addr(tag: u8) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = tag;
    Address(bytes)
}

pub fn vote(power: u64, signed: bool) -> VoteRecord {
    VoteRecord {
        validator: addr(0xEE),
        validator_power: power,
        signed_last_block: signed,
    }
}

pub fn begin_event(height: Height, proposer: Address) -> BeginBlockEvent {
    BeginBlockEvent {
        height,
        proposer,
        timestamp: 1_700_000_000 + height,
        last_commit_votes: vec![vote(100, true), vote(50, true), vote(25, false)],
    }
}

/// Ledger mock that records every call in order.
#[derive(Default)]
pub struct RecordingLedger {
    pub calls: Mutex<Vec<String>>,
    previous: Mutex<Address>,
}

impl RecordingLedger {
    pub fn count_of(&self, name: &str) -> usize {
        self.calls.lock().iter().filter(|c| *c == name).count()
    }
}

#[async_trait]
impl TokenLedgerGateway for RecordingLedger {
    async fn allocate_tokens(
        &self,
        precommit_power: u64,
        total_power: u64,
        previous_proposer: Address,
        _votes: &[VoteRecord],
    ) -> SettlementResult<()> {
        self.calls.lock().push(format!(
            "allocate {precommit_power}/{total_power} {previous_proposer}"
        ));
        Ok(())
    }

    async fn distribute_all_rewards(&self) -> SettlementResult<()> {
        self.calls.lock().push("distribute".into());
        Ok(())
    }

    async fn snapshot_validators(&self) -> SettlementResult<()> {
        self.calls.lock().push("snapshot".into());
        Ok(())
    }

    async fn previous_proposer(&self) -> SettlementResult<Address> {
        Ok(*self.previous.lock())
    }

    async fn set_previous_proposer(&self, proposer: Address) -> SettlementResult<()> {
        *self.previous.lock() = proposer;
        Ok(())
    }
}

/// Order book mock serving preset per-height match results.
#[derive(Default)]
pub struct StaticOrderBook {
    pub results: BTreeMap<Height, BTreeMap<String, MatchResult>>,
    pub senders: BTreeMap<String, Address>,
}

#[async_trait]
impl OrderBookGateway for StaticOrderBook {
    async fn order_sender(&self, order_id: &str) -> SettlementResult<Option<Address>> {
        Ok(self.senders.get(order_id).copied())
    }

    async fn match_results(
        &self,
        height: Height,
    ) -> SettlementResult<BTreeMap<String, MatchResult>> {
        Ok(self.results.get(&height).cloned().unwrap_or_default())
    }
}

pub type TestService = BlockLifecycleService<RecordingLedger, StaticOrderBook, InMemorySettlementStore>;

pub struct TestHarness {
    pub service: TestService,
    pub ledger: Arc<RecordingLedger>,
    pub store: Arc<InMemorySettlementStore>,
}

/// Wire a service against the mocks with a chosen epoch interval.
pub fn harness(interval_blocks: u64, orders: StaticOrderBook) -> TestHarness {
    harness_with_router(
        interval_blocks,
        orders,
        VersionRouter::new(VersionTable::single(ProtocolVersion::V1)),
    )
}

/// Wire a service with a caller-supplied router, for version dispatch
/// scenarios.
pub fn harness_with_router(
    interval_blocks: u64,
    orders: StaticOrderBook,
    router: VersionRouter,
) -> TestHarness {
    let ledger = Arc::new(RecordingLedger::default());
    let store = Arc::new(InMemorySettlementStore::new());
    let config = SettlementConfig {
        epoch: EpochConfig { interval_blocks },
        kline: KLineConfig::default(),
    };
    let service = BlockLifecycleService::new(
        config,
        router,
        ledger.clone(),
        Arc::new(orders),
        store.clone(),
    )
    .expect("valid test config");
    TestHarness {
        service,
        ledger,
        store,
    }
}

/// Drive one full block through begin and end.
pub async fn run_block(service: &TestService, height: Height, proposer: Address) {
    service
        .on_begin_block(begin_event(height, proposer))
        .await
        .expect("begin-block");
    service
        .on_end_block(EndBlockEvent { height })
        .await
        .expect("end-block");
}
