//! # Shared Types Crate
//!
//! Domain entities shared across the settlement pipeline workspace.
//!
//! ## Clusters
//!
//! - **Primitives**: `Height`, `Timestamp`, `Address`, `Decimal`
//! - **Consensus inputs**: `VoteRecord`, `PowerTotals`
//! - **Settlement records**: `MatchResult`, `DealRecord`, `Trade`, `Match`,
//!   `KLineMin`
//!
//! All persisted record types are append-only: they are created once at
//! settlement time and never mutated afterwards. The sole exception is
//! `KLineMin`, a derived read-side index that is folded incrementally.

pub mod decimal;
pub mod primitives;
pub mod records;
pub mod votes;

pub use decimal::{Decimal, DecimalError};
pub use primitives::{Address, Height, Timestamp};
pub use records::{DealRecord, KLineMin, Match, MatchResult, Trade};
pub use votes::{PowerTotals, VoteRecord};
