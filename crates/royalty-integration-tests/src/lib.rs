//! Integration test crate for the royalty ledger.
//!
//! This crate has no library code. It only contains tests that drive a
//! [`RoyaltyLedger`](royalty_ledger::RoyaltyLedger) through complete
//! fund/distribute/mint/claim sequences, across the ledger and storage
//! crates.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p royalty-integration-tests
//! ```
