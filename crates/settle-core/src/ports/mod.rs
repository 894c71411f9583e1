//! Ports for the settlement pipeline

pub mod inbound;
pub mod outbound;

pub use inbound::{BlockLifecycleApi, Page};
pub use outbound::{OrderBookGateway, SettlementStore, TokenLedgerGateway};
