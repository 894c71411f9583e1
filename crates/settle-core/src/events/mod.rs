//! Events crossing the consensus-engine boundary

pub mod incoming;
pub mod outgoing;

pub use incoming::{BeginBlockEvent, EndBlockEvent};
pub use outgoing::EventTag;
