//! Configuration types for the settlement pipeline

use crate::error::{SettlementError, SettlementResult};
use serde::Deserialize;
use std::num::NonZeroU64;

/// Default epoch length: 3 days of blocks at 1-second block time.
pub const DEFAULT_EPOCH_INTERVAL_BLOCKS: u64 = 259_200;

/// Default KLine bucket width: one minute.
pub const DEFAULT_KLINE_BUCKET_SECS: u64 = 60;

/// Epoch cadence settings, fixed at process start.
#[derive(Clone, Debug, Deserialize)]
pub struct EpochConfig {
    /// Number of blocks per epoch. Must be positive.
    pub interval_blocks: u64,
}

impl Default for EpochConfig {
    fn default() -> Self {
        Self {
            interval_blocks: DEFAULT_EPOCH_INTERVAL_BLOCKS,
        }
    }
}

impl EpochConfig {
    /// Validated interval; zero is a startup configuration error.
    pub fn interval(&self) -> SettlementResult<NonZeroU64> {
        NonZeroU64::new(self.interval_blocks)
            .ok_or_else(|| SettlementError::config("epoch interval_blocks must be positive"))
    }
}

/// KLine aggregation settings.
///
/// Bucketing is fixed by configuration, never inferred from the data.
#[derive(Clone, Debug, Deserialize)]
pub struct KLineConfig {
    /// Width of one OHLCV bucket, in seconds. Must be positive.
    pub bucket_secs: u64,
}

impl Default for KLineConfig {
    fn default() -> Self {
        Self {
            bucket_secs: DEFAULT_KLINE_BUCKET_SECS,
        }
    }
}

impl KLineConfig {
    /// Validated bucket width; zero is a startup configuration error.
    pub fn bucket(&self) -> SettlementResult<NonZeroU64> {
        NonZeroU64::new(self.bucket_secs)
            .ok_or_else(|| SettlementError::config("kline bucket_secs must be positive"))
    }
}

/// Runtime configuration for the settlement pipeline.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SettlementConfig {
    pub epoch: EpochConfig,
    pub kline: KLineConfig,
}
