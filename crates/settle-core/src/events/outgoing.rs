//! Event tags returned to the consensus engine

use serde::{Deserialize, Serialize};
use settle_types::{Address, Height};

/// A key/value tag attached to a block's begin or end result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTag {
    pub key: String,
    pub value: String,
}

impl EventTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Per-block rewards were allocated against this previous proposer.
    pub fn rewards_allocated(previous_proposer: Address) -> Self {
        Self::new("rewards.allocated", previous_proposer.to_string())
    }

    /// Epoch boundary reached: full distribution and snapshot ran.
    pub fn epoch_settled(height: Height) -> Self {
        Self::new("epoch.settled", height.to_string())
    }

    /// One product's match was settled, with its trade count.
    pub fn product_settled(product: &str, trade_count: usize) -> Self {
        Self::new(format!("settled.{product}"), trade_count.to_string())
    }
}
