//! Consensus vote inputs
//!
//! The consensus engine hands the settlement core one `VoteRecord` per
//! validator at begin-block, describing the previous block's commit.

use crate::primitives::Address;
use serde::{Deserialize, Serialize};

/// A single validator's vote on the previous block's commit.
///
/// Immutable input, consumed exactly once per begin-block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    /// The voting validator's address.
    pub validator: Address,
    /// Declared voting power, in integer power units.
    pub validator_power: u64,
    /// Whether this validator's precommit for the last block was counted.
    pub signed_last_block: bool,
}

/// Power sums derived from one block's vote set.
///
/// Scoped to a single block height and discarded after reward allocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerTotals {
    /// Sum of every voter's declared power.
    pub total_power: u64,
    /// Sum of power for voters whose precommit was counted.
    pub precommit_power: u64,
}
