//! Protocol version resolution
//!
//! Behavior variants are gated by block height so a rule change can activate
//! at a hard-fork height without redeploying a binary or invalidating
//! historical blocks. The threshold table is validated at construction to be
//! total over `[0, ∞)`: it starts at height 0, start heights strictly
//! increase, and the last entry is open-ended.

use crate::error::{SettlementError, SettlementResult};
use serde::{Deserialize, Serialize};
use settle_types::Height;

/// Height-gated protocol behavior variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    V1,
    V2,
}

/// Ordered, gap-free mapping from height ranges to protocol versions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionTable {
    /// `(activation_height, version)` pairs, ascending by height.
    entries: Vec<(Height, ProtocolVersion)>,
}

impl VersionTable {
    /// Build a table from `(activation_height, version)` pairs.
    ///
    /// The first entry must activate at height 0 and activation heights must
    /// strictly increase; anything else would leave heights unmapped or
    /// ambiguous, which is a startup configuration error.
    pub fn new(entries: Vec<(Height, ProtocolVersion)>) -> SettlementResult<Self> {
        let first = entries
            .first()
            .ok_or_else(|| SettlementError::config("version table must not be empty"))?;
        if first.0 != 0 {
            return Err(SettlementError::config(
                "version table must cover height 0",
            ));
        }
        for pair in entries.windows(2) {
            if pair[1].0 <= pair[0].0 {
                return Err(SettlementError::config(
                    "version table activation heights must strictly increase",
                ));
            }
        }
        Ok(Self { entries })
    }

    /// A single-version table covering all heights.
    pub fn single(version: ProtocolVersion) -> Self {
        Self {
            entries: vec![(0, version)],
        }
    }

    /// Resolve the active version for a height.
    ///
    /// Total over all heights: the last entry whose activation height does
    /// not exceed `height` wins, and the final entry is open-ended.
    pub fn resolve(&self, height: Height) -> ProtocolVersion {
        let mut active = self.entries[0].1;
        for &(start, version) in &self.entries {
            if start <= height {
                active = version;
            } else {
                break;
            }
        }
        active
    }
}
