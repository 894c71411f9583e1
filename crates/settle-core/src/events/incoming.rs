//! Events delivered by the consensus engine

use serde::{Deserialize, Serialize};
use settle_types::{Address, Height, Timestamp, VoteRecord};

/// Begin-block delivery: header identity plus the last commit's vote set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeginBlockEvent {
    pub height: Height,
    /// Proposer of the block being begun, from the block header.
    pub proposer: Address,
    /// Block time from the header; carried forward to settlement.
    pub timestamp: Timestamp,
    /// Vote set for the previous block's commit.
    pub last_commit_votes: Vec<VoteRecord>,
}

/// End-block delivery: a bare height signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndBlockEvent {
    pub height: Height,
}
