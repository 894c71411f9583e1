//! Error types for the settlement pipeline
//!
//! Four failure classes with very different blast radii:
//!
//! - `Config`: startup-fatal, never recovered at runtime.
//! - `Routing`: the offending message is rejected; the enclosing block is
//!   otherwise unaffected.
//! - `Sequencing`: fatal - the driving engine violated its delivery
//!   contract and no local recovery is attempted.
//! - `Ledger` / `Store` / `UnknownOrder`: fatal to the block in flight; the
//!   storage layer's all-or-nothing commit discards the partial transition.

use crate::domain::version::ProtocolVersion;
use settle_types::Height;
use thiserror::Error;

/// Settlement pipeline errors
#[derive(Debug, Error)]
pub enum SettlementError {
    /// Invalid startup configuration
    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    /// No handler registered for the protocol version resolved at a height
    #[error("unknown protocol version {version:?} for height {height}")]
    Routing {
        height: Height,
        version: ProtocolVersion,
    },

    /// The driving engine broke its sequencing contract
    #[error("sequencing violation: {reason}")]
    Sequencing { reason: String },

    /// Token/staking ledger operation failed
    #[error("token ledger failure: {reason}")]
    Ledger { reason: String },

    /// Settlement store operation failed
    #[error("settlement store failure: {reason}")]
    Store { reason: String },

    /// A deal referenced an order the order subsystem cannot resolve
    #[error("unknown order: {order_id}")]
    UnknownOrder { order_id: String },
}

impl SettlementError {
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    pub fn sequencing(reason: impl Into<String>) -> Self {
        Self::Sequencing {
            reason: reason.into(),
        }
    }
}

/// Result type for settlement operations
pub type SettlementResult<T> = Result<T, SettlementError>;
