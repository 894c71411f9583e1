//! # Settle-Chain Test Suite
//!
//! Unified test crate for cross-module scenarios:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── lifecycle.rs   # begin/end choreography, epoch cadence, sequencing
//!     └── settlement.rs  # record round-trips, history queries, version routing
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p settle-tests
//! cargo test -p settle-tests integration::lifecycle
//! ```

#![allow(dead_code)]

pub mod integration;
