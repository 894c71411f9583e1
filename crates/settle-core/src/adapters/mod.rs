//! Concrete port implementations

pub mod memory;

pub use memory::InMemorySettlementStore;
