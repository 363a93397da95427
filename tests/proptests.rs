//! Property-based tests for mnemonic-sss.
//!
//! This test suite uses quickcheck to verify correctness across random
//! inputs: random entropy/mnemonics, BigInt arithmetic, and arbitrary valid
//! (threshold, share_count) configurations.
//!
//! Run with: cargo test --test proptests

#[path = "proptests/bip39.rs"]
mod bip39;

#[path = "proptests/split_combine.rs"]
mod split_combine;
