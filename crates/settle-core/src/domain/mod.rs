//! Domain logic for the settlement pipeline
//!
//! Pure, side-effect-free computations. Everything that touches a gateway
//! or the store lives in `service.rs`.

pub mod epoch;
pub mod settlement;
pub mod version;
pub mod voting_power;

pub use epoch::{epoch_status, EpochStatus};
pub use settlement::{bucket_start, build_records, fold_klines};
pub use version::{ProtocolVersion, VersionTable};
pub use voting_power::aggregate_power;
