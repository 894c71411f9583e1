//! Cross-module integration scenarios

pub mod fixtures;
pub mod lifecycle;
