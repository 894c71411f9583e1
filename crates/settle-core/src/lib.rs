//! # settle-core
//!
//! Deterministic per-block settlement pipeline: the application-level state
//! machine run at block-begin and block-end.
//!
//! ## Overview
//!
//! This subsystem provides:
//! - **Reward allocation**: proposer/validator rewards proportional to
//!   observed voting power, with the intentional one-block proposer lag
//! - **Epoch tracking**: fixed block-count cadence triggering full reward
//!   distribution and validator-set snapshotting
//! - **Version routing**: height-gated dispatch so protocol behavior can
//!   change at a hard-fork height without breaking historical replay
//! - **Settlement recording**: durable Trade/Match facts plus the derived
//!   KLine index, keyed by block height
//!
//! ## Architecture
//!
//! ```text
//! Consensus engine ──BeginBlockEvent──→ BlockLifecycleService
//!                                            │ aggregate power
//!                                            │ allocate per-block rewards ──→ TokenLedgerGateway
//!                                            │ epoch boundary? distribute + snapshot
//!                   ──EndBlockEvent────→     │
//!                                            │ settle matches ──→ OrderBookGateway
//!                                            │                └──→ SettlementStore
//!                                            └ module hooks ──→ VersionRouter
//! ```
//!
//! ## Determinism
//!
//! Same inputs at the same height always produce the same state transition
//! and the same emitted facts: power sums are commutative integer
//! arithmetic, products are walked in sorted key order, trades are sorted
//! by (product, order_id), and prices/quantities are fixed-point decimals.
//!
//! ## Example
//!
//! ```rust,ignore
//! use settle_core::{
//!     BlockLifecycleService, SettlementConfig, VersionRouter, VersionTable,
//!     ProtocolVersion,
//! };
//! use settle_core::ports::inbound::BlockLifecycleApi;
//!
//! let router = VersionRouter::new(VersionTable::single(ProtocolVersion::V1));
//! let service = BlockLifecycleService::new(
//!     SettlementConfig::default(),
//!     router,
//!     token_ledger,
//!     order_book,
//!     store,
//! )?;
//!
//! let tags = service.on_begin_block(begin_event).await?;
//! let tags = service.on_end_block(end_event).await?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod ports;
pub mod router;
pub mod service;

pub use adapters::InMemorySettlementStore;
pub use config::{EpochConfig, KLineConfig, SettlementConfig};
pub use domain::epoch::{epoch_status, EpochStatus};
pub use domain::version::{ProtocolVersion, VersionTable};
pub use domain::voting_power::aggregate_power;
pub use error::{SettlementError, SettlementResult};
pub use events::{BeginBlockEvent, EndBlockEvent, EventTag};
pub use ports::inbound::{BlockLifecycleApi, Page};
pub use ports::outbound::{OrderBookGateway, SettlementStore, TokenLedgerGateway};
pub use router::{ModuleHandler, ModuleKind, ModuleMessage, VersionRouter};
pub use service::BlockLifecycleService;
