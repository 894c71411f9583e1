//! Epoch boundary detection
//!
//! Fixed-interval boundary detector over block height. Heights that are an
//! exact multiple of the interval (height 0 included) are boundaries and
//! report zero blocks remaining, so epoch side effects fire exactly once per
//! boundary height.

use settle_types::Height;
use std::num::NonZeroU64;

/// Derived epoch position for one height. Never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpochStatus {
    /// True iff this height is an epoch boundary.
    pub is_epoch_end: bool,
    /// Blocks until the next boundary; 0 on a boundary.
    pub blocks_remaining: u64,
}

/// Compute the epoch position of `height` under a fixed interval.
///
/// Pure function of its inputs. The interval is `NonZeroU64` because a zero
/// interval is rejected at configuration time.
pub fn epoch_status(height: Height, interval_blocks: NonZeroU64) -> EpochStatus {
    let remainder = height % interval_blocks.get();
    if remainder == 0 {
        EpochStatus {
            is_epoch_end: true,
            blocks_remaining: 0,
        }
    } else {
        EpochStatus {
            is_epoch_end: false,
            blocks_remaining: interval_blocks.get() - remainder,
        }
    }
}
