//! Validated newtypes for Shamir Secret Sharing parameters.
//!
//! - [`Threshold`] - minimum shares required for reconstruction (`2..=20`)
//! - [`ShareIndex`] - a share's `x` value (`1..=20`)
//! - [`ShareCount`] - total number of shares to create (`2..=20`)
//! - [`SplitConfig`] - validated `threshold <= share_count` pair
//!
//! Every constructor here is the one gate between untrusted CLI/WASM input
//! and the core engine: once a value has type [`Threshold`] or [`ShareIndex`]
//! the range invariant from spec.md's error model is already upheld, so
//! [`crate::shamir`] and [`crate::facade`] never re-check it.

mod config;
mod share_count;
mod share_index;
mod threshold;

pub use config::SplitConfig;
pub use share_count::ShareCount;
pub use share_index::ShareIndex;
pub use threshold::Threshold;
