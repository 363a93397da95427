// Internal library for testing purposes
// Not intended for external use as a library

pub mod bigint;
pub mod bip39;
pub mod domain;
pub mod error;
pub mod facade;
pub mod hash;
pub mod shamir;
pub mod wordlist;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod commands;
#[cfg(feature = "cli")]
pub mod input;

// WASM bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;
