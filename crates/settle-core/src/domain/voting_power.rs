//! Vote-set power aggregation
//!
//! Pure reduction of one block's last-commit vote set. Addition is
//! commutative, so iteration order cannot affect the result; power is in
//! integer units, never floating point.

use settle_types::{PowerTotals, VoteRecord};

/// Reduce a block's vote set into total and participating power.
///
/// An empty vote set yields zero totals; there is no failure mode.
pub fn aggregate_power(votes: &[VoteRecord]) -> PowerTotals {
    let mut totals = PowerTotals::default();
    for vote in votes {
        totals.total_power = totals.total_power.saturating_add(vote.validator_power);
        if vote.signed_last_block {
            totals.precommit_power = totals.precommit_power.saturating_add(vote.validator_power);
        }
    }
    totals
}
